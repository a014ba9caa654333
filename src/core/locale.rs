//! User-facing strings. The screen ships in Hebrew.

pub const ALERT_ERROR_TITLE: &str = "שגיאה";
pub const ALERT_NO_PERMISSION: &str = "אין הרשאת מיקום";
pub const ALERT_NO_LOCATION: &str = "לא ניתן לקבל מיקום נוכחי";

pub const CONFIRM_REMOVE_TITLE: &str = "הסר אירוע";
pub const CONFIRM_REMOVE_MESSAGE: &str = "האם אתה בטוח שברצונך למחוק אירוע זה?";
pub const CONFIRM_YES: &str = "כן";
pub const CANCEL: &str = "ביטול";
pub const OK: &str = "אישור";

pub const PICKER_TITLE: &str = "בחר אירוע";
pub const PICKER_TAP_HINT: &str = "הקש על המפה כדי למקם את האירוע";

pub const SEARCH_PLACEHOLDER: &str = "חפש עיר...";
pub const SEARCH_NO_RESULTS: &str = "לא נמצאו תוצאות";

pub const MENU_SETTINGS: &str = "הגדרות";
pub const MENU_HISTORY: &str = "היסטוריית התרעות";
pub const MENU_CONTACT: &str = "צרו עמנו קשר";
pub const MENU_ABOUT: &str = "אודות היישומון";

fn is_rtl_char(c: char) -> bool {
    ('\u{0590}'..='\u{05FF}').contains(&c) || ('\u{FB1D}'..='\u{FB4F}').contains(&c)
}

fn is_ltr_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

/// Reorders a logical-order string for a left-to-right-only text renderer.
///
/// Text without Hebrew is returned unchanged. Otherwise the string is laid
/// out right to left while runs of Latin letters and digits keep their own
/// order. Bracket mirroring and embedded direction marks are not handled.
pub fn visual_order(text: &str) -> String {
    if !text.chars().any(is_rtl_char) {
        return text.to_string();
    }

    let mut runs: Vec<String> = Vec::new();
    let mut ltr_run = String::new();
    for c in text.chars() {
        let continues_ltr = !ltr_run.is_empty() && matches!(c, '.' | ',' | ':' | '-' | '/');
        if is_ltr_char(c) || continues_ltr {
            ltr_run.push(c);
            continue;
        }
        if !ltr_run.is_empty() {
            runs.push(std::mem::take(&mut ltr_run));
        }
        runs.push(c.to_string());
    }
    if !ltr_run.is_empty() {
        runs.push(ltr_run);
    }

    runs.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_text_unchanged() {
        assert_eq!(visual_order("Tel Aviv 2024"), "Tel Aviv 2024");
    }

    #[test]
    fn test_hebrew_reversed() {
        assert_eq!(visual_order("אבג"), "גבא");
        assert_eq!(visual_order("חפש עיר"), "ריע שפח");
    }

    #[test]
    fn test_numbers_keep_order() {
        assert_eq!(visual_order("כביש 443"), "443 שיבכ");
    }
}
