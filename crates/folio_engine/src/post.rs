use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use folio_core::{BlogPost, POST_EXTENSION};

use crate::excerpt::build_excerpt;
use crate::frontmatter::parse_frontmatter;

/// Case-sensitive `.md` suffix check on a listing entry name.
pub fn is_post_file(name: &str) -> bool {
    name.len() > POST_EXTENSION.len() && name.ends_with(POST_EXTENSION)
}

/// `hello-world.md` -> `hello-world`.
pub fn slug_from_file_name(name: &str) -> &str {
    name.strip_suffix(POST_EXTENSION).unwrap_or(name)
}

/// Builds the post record for one fetched document.
///
/// Missing metadata falls back to: slug for the title, `now` for the date,
/// and a stripped prefix of the body for the excerpt.
pub fn build_post(file_name: &str, content: String, now: DateTime<Utc>) -> BlogPost {
    let meta = parse_frontmatter(&content);
    let slug = slug_from_file_name(file_name).to_string();
    let title = meta.title.unwrap_or_else(|| slug.clone());
    let date = meta
        .date
        .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true));
    let excerpt = meta.excerpt.unwrap_or_else(|| build_excerpt(&content));
    BlogPost {
        title,
        content,
        date,
        slug,
        excerpt,
    }
}

/// Accepts RFC 3339 and the common date / date-time forms used in post metadata.
/// Forms without an offset are read as UTC.
pub fn parse_post_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Newest first. The sort is stable, so equal dates keep listing order;
/// unparseable dates go after every parseable one.
pub fn sort_posts(posts: &mut [BlogPost]) {
    posts.sort_by_cached_key(|post| std::cmp::Reverse(parse_post_date(&post.date)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
    }

    #[test]
    fn only_lowercase_md_files_are_posts() {
        assert!(is_post_file("a.md"));
        assert!(!is_post_file("b.txt"));
        assert!(!is_post_file("c.MD"));
        assert!(!is_post_file(".md"));
        assert!(!is_post_file("notes.md.bak"));
    }

    #[test]
    fn slug_strips_only_the_trailing_extension() {
        assert_eq!(slug_from_file_name("hello-world.md"), "hello-world");
        assert_eq!(slug_from_file_name("a.md.md"), "a.md");
    }

    #[test]
    fn fallback_title_is_slug() {
        let post = build_post("hello-world.md", "Plain body".to_string(), fixed_now());
        assert_eq!(post.title, "hello-world");
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.date, "2026-01-02T03:04:05.000Z");
        assert_eq!(post.excerpt, "Plain body");
        assert_eq!(post.content, "Plain body");
    }

    #[test]
    fn metadata_wins_over_fallbacks() {
        let content = "---\ntitle: \"Hi There\"\ndate: 2024-03-01\nexcerpt: 'Custom'\n---\nBody text";
        let post = build_post("hi.md", content.to_string(), fixed_now());
        assert_eq!(
            post,
            BlogPost {
                title: "Hi There".to_string(),
                content: content.to_string(),
                date: "2024-03-01".to_string(),
                slug: "hi".to_string(),
                excerpt: "Custom".to_string(),
            }
        );
    }

    #[test]
    fn building_is_deterministic() {
        let content = "---\ntitle: Same\n---\n# Body".to_string();
        let a = build_post("same.md", content.clone(), fixed_now());
        let b = build_post("same.md", content, fixed_now());
        assert_eq!(a, b);
    }

    #[test]
    fn parses_supported_date_forms() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_post_date("2024-03-01"), Some(midnight));
        assert_eq!(parse_post_date("2024-03-01T00:00:00Z"), Some(midnight));
        assert_eq!(parse_post_date("2024-03-01T02:00:00+02:00"), Some(midnight));
        assert_eq!(parse_post_date("2024-03-01 00:00:00"), Some(midnight));
        assert_eq!(parse_post_date("2024-03-01T00:00"), Some(midnight));
        assert_eq!(parse_post_date("March 1st"), None);
    }

    #[test]
    fn sorts_newest_first_with_stable_ties() {
        let mut posts = vec![
            build_post("a.md", "---\ndate: 2024-01-01\n---\n".into(), fixed_now()),
            build_post("b.md", "---\ndate: 2025-06-15\n---\n".into(), fixed_now()),
            build_post("c.md", "---\ndate: someday\n---\n".into(), fixed_now()),
            build_post("d.md", "---\ndate: 2024-01-01\n---\n".into(), fixed_now()),
            build_post("e.md", "no metadata".into(), fixed_now()),
        ];
        sort_posts(&mut posts);
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["e", "b", "a", "d", "c"]);
    }
}
