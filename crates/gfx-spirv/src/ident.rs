// SPDX-License-Identifier: CEPL-1.0

/// Turns a file name into a C identifier: every char outside `[0-9A-Za-z_]`
/// becomes `_`, and a leading run of digits collapses into a single `_`.
/// An empty name maps to `_`.
pub fn sanitize_identifier(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let body = replaced.trim_start_matches(|c: char| c.is_ascii_digit());
    if body.len() != replaced.len() || replaced.is_empty() {
        format!("_{body}")
    } else {
        replaced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(sanitize_identifier("3shader.comp"), "_shader_comp");
        assert_eq!(sanitize_identifier("my-shader.vert"), "my_shader_vert");
        assert_eq!(sanitize_identifier("tri.frag"), "tri_frag");
        assert_eq!(sanitize_identifier("_ok"), "_ok");
    }

    #[test]
    fn leading_digits_collapse() {
        assert_eq!(sanitize_identifier("2024.vert"), "__vert");
        assert_eq!(sanitize_identifier("42"), "_");
        assert_eq!(sanitize_identifier("0_a"), "__a");
    }

    #[test]
    fn non_ascii_is_one_underscore_per_char() {
        assert_eq!(sanitize_identifier("ñandú.vert"), "_and__vert");
        assert_eq!(sanitize_identifier("a b"), "a_b");
    }

    #[test]
    fn empty_name() {
        assert_eq!(sanitize_identifier(""), "_");
    }

    #[test]
    fn idempotent() {
        for s in [
            "",
            "_",
            "3shader.comp",
            "my-shader.vert",
            "007",
            "9-lives",
            "ünï.côde",
            "plain",
            "  spaced  ",
        ] {
            let once = sanitize_identifier(s);
            assert_eq!(sanitize_identifier(&once), once, "input {s:?}");
        }
    }

    #[test]
    fn idempotent_over_short_strings() {
        let alphabet = ['a', 'Z', '0', '7', '_', '-', '.', ' ', 'é'];
        let mut inputs = vec![String::new()];
        for &c in &alphabet {
            inputs.push(c.to_string());
            for &d in &alphabet {
                inputs.push(format!("{c}{d}"));
                for &e in &alphabet {
                    inputs.push(format!("{c}{d}{e}"));
                }
            }
        }
        for s in &inputs {
            let once = sanitize_identifier(s);
            assert_eq!(sanitize_identifier(&once), once, "input {s:?}");
            assert!(!once.starts_with(|c: char| c.is_ascii_digit()), "input {s:?}");
            assert!(once.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }
    }
}
