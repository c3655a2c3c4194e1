use nestlex_langs::names;

/// One bundled language name per line.
pub fn list_languages() -> String {
    let mut out = String::new();
    for name in names() {
        out.push_str(name);
        out.push('\n');
    }
    out
}
