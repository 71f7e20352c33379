/// Turn a title into a URL slug, transliterating Turkish letters.
///
/// Runs of anything outside `[a-z0-9]` collapse into one `-`; leading and
/// trailing dashes are removed.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        let mapped = match c {
            'ğ' | 'Ğ' => 'g',
            'ü' | 'Ü' => 'u',
            'ş' | 'Ş' => 's',
            'ı' | 'I' | 'İ' => 'i',
            'ö' | 'Ö' => 'o',
            'ç' | 'Ç' => 'c',
            c => c.to_ascii_lowercase(),
        };
        if mapped.is_ascii_lowercase() || mapped.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(mapped);
        } else {
            pending_dash = true;
        }
    }

    slug
}
