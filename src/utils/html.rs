use std::collections::HashSet;

use ammonia::Builder;

/// Strip all markup from free text supplied by a respondent.
///
/// Unlike `ammonia::clean`, no tag survives: the text of ordinary tags is kept
/// and `<script>`/`<style>` are dropped together with their content. Names are
/// shown on the instructor dashboard, so they must never carry live HTML.
pub fn clean_text(input: &str) -> String {
    Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(input)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_text() {
        assert_eq!(clean_text("Priya Sharma"), "Priya Sharma");
    }

    #[test]
    fn strips_tags_but_keeps_inner_text() {
        assert_eq!(clean_text("<b>Priya</b> <i>Sharma</i>"), "Priya Sharma");
    }

    #[test]
    fn drops_script_content() {
        assert_eq!(clean_text("<script>alert('x')</script>Amit"), "Amit");
    }
}
