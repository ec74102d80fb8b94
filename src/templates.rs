//! Starter content for `sbuild new`.
//!
//! ## Languages
//!
//! - `cpp` - `src/main.cpp` built with `g++` (default)
//! - `c` - `src/main.c` built with `gcc`

use crate::config::ProjectDescriptor;

/// Returns the descriptor and entry-point source for a new project.
///
/// `greeting` ends up inside a string literal, so quotes and backslashes are
/// escaped here.
pub fn get_template(greeting: &str, lang: &str) -> (ProjectDescriptor, String) {
    let greeting = escape_c_string(greeting);
    match lang {
        "c" => (
            ProjectDescriptor::scaffold(true),
            format!(
                r#"#include <stdio.h>

int main(void) {{
    printf("Hello from {}!\n");
    return 0;
}}
"#,
                greeting
            ),
        ),
        _ => (
            ProjectDescriptor::scaffold(false),
            format!(
                r#"#include <iostream>

int main() {{
    std::cout << "Hello from {}!\n";
    return 0;
}}
"#,
                greeting
            ),
        ),
    }
}

fn escape_c_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}
