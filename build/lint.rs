// Line-level helpers shared by the build script and its tests. Std only, so
// the test crate can include this file without the build dependencies.

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The code part of one source line: string contents are blanked and a
/// trailing `//` comment is dropped. Quotes are kept so positions stay readable.
pub fn code_portion(line: &str) -> String {
    let mut code = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    let mut in_string = false;
    while let Some(c) = chars.next() {
        if in_string {
            match c {
                '\\' => {
                    chars.next();
                    code.push_str("  ");
                }
                '"' => {
                    in_string = false;
                    code.push('"');
                }
                _ => code.push(' '),
            }
            continue;
        }
        match c {
            '"' => {
                in_string = true;
                code.push('"');
            }
            '/' if chars.peek() == Some(&'/') => break,
            '\'' => {
                code.push('\'');
                // A quote character literal must not open a string.
                let mut lookahead = chars.clone();
                if lookahead.next() == Some('"') && lookahead.next() == Some('\'') {
                    chars.next();
                    chars.next();
                    code.push_str(" '");
                }
            }
            _ => code.push(c),
        }
    }
    code
}

/// True when the code part of `line` names an identifier starting with `_`.
pub fn has_underscore_binding(line: &str) -> bool {
    let code: Vec<char> = code_portion(line).chars().collect();
    code.iter().enumerate().any(|(i, &c)| {
        c == '_'
            && (i == 0 || !is_word(code[i - 1]))
            && code.get(i + 1).is_some_and(|&next| is_word(next))
    })
}
