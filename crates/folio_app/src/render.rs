use std::fmt::Write;

use folio_core::{BlogPost, FeedPresentation, FeedViewModel};
use folio_engine::parse_post_date;
use serde_json::{json, Value};
use url::Url;

const HEADING: &str = "Latest Blog Posts";

/// Renders the feed as the reader sees it on the site, one card per post.
pub fn render_text(view: &FeedViewModel, limit: usize, host_base: &Url) -> String {
    let mut out = String::new();
    match view.presentation(limit) {
        FeedPresentation::Loading => out.push_str("Loading blog posts...\n"),
        FeedPresentation::Failed { guidance, .. } => {
            out.push_str("Unable to load blog posts\n");
            out.push_str(&guidance);
            out.push('\n');
        }
        FeedPresentation::Empty => {
            out.push_str("No blog posts found\n");
            out.push_str("Create some markdown files in your GitHub repository to get started!\n");
        }
        FeedPresentation::Posts { shown, hidden } => {
            let _ = writeln!(out, "{HEADING}\n");
            for post in shown {
                let _ = writeln!(out, "{}", format_date(&post.date));
                let _ = writeln!(out, "{}", post.title);
                if !post.excerpt.is_empty() {
                    let _ = writeln!(out, "{}", post.excerpt);
                }
                if let Some(link) = post_link(view, host_base, post) {
                    let _ = writeln!(out, "Read more: {link}");
                }
                out.push('\n');
            }
            if hidden > 0 {
                let tree = view
                    .source
                    .as_ref()
                    .and_then(|source| source.tree_url(host_base));
                match tree {
                    Some(url) => {
                        let _ = writeln!(out, "View all posts ({hidden} more): {url}");
                    }
                    None => {
                        let _ = writeln!(out, "{hidden} more posts not shown");
                    }
                }
            }
        }
    }
    out
}

/// The observable `{ posts, loading, error }` state as JSON. All posts are
/// included regardless of the card limit.
pub fn render_json(view: &FeedViewModel, host_base: &Url) -> Value {
    let posts: Vec<Value> = view
        .posts
        .iter()
        .map(|post| {
            json!({
                "title": post.title,
                "date": post.date,
                "slug": post.slug,
                "excerpt": post.excerpt,
                "content": post.content,
                "url": post_link(view, host_base, post).map(|url| url.to_string()),
            })
        })
        .collect();
    json!({
        "posts": posts,
        "loading": view.loading,
        "error": view.error,
    })
}

/// `2024-01-05` -> `January 5, 2024`; unparseable dates are shown verbatim.
pub fn format_date(date: &str) -> String {
    match parse_post_date(date) {
        Some(parsed) => parsed.format("%B %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

fn post_link(view: &FeedViewModel, host_base: &Url, post: &BlogPost) -> Option<Url> {
    view.source
        .as_ref()
        .and_then(|source| source.post_url(host_base, &post.slug))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{ContentSource, GUIDANCE_SUFFIX};
    use pretty_assertions::assert_eq;

    fn host() -> Url {
        Url::parse("https://github.com").unwrap()
    }

    fn post(n: usize) -> BlogPost {
        BlogPost {
            title: format!("Post {n}"),
            content: format!("body {n}"),
            date: "2024-01-05".to_string(),
            slug: format!("post-{n}"),
            excerpt: format!("body {n}"),
        }
    }

    fn loaded(posts: Vec<BlogPost>) -> FeedViewModel {
        FeedViewModel {
            source: Some(ContentSource::new("octo", "site", "main", "blogs").unwrap()),
            posts,
            loading: false,
            error: None,
            dirty: false,
        }
    }

    #[test]
    fn formats_dates_for_humans() {
        assert_eq!(format_date("2024-01-05"), "January 5, 2024");
        assert_eq!(format_date("2025-06-15T10:00:00Z"), "June 15, 2025");
        assert_eq!(format_date("someday"), "someday");
    }

    #[test]
    fn loading_view() {
        let view = FeedViewModel {
            loading: true,
            ..FeedViewModel::default()
        };
        assert_eq!(render_text(&view, 6, &host()), "Loading blog posts...\n");
    }

    #[test]
    fn failure_view_shows_guidance() {
        let view = FeedViewModel {
            error: Some("Failed to fetch blog posts".to_string()),
            ..FeedViewModel::default()
        };
        assert_eq!(
            render_text(&view, 6, &host()),
            format!("Unable to load blog posts\nFailed to fetch blog posts{GUIDANCE_SUFFIX}\n")
        );
    }

    #[test]
    fn empty_view_prompts_for_posts() {
        let text = render_text(&loaded(Vec::new()), 6, &host());
        assert!(text.starts_with("No blog posts found\n"));
    }

    #[test]
    fn post_cards_link_to_host() {
        let text = render_text(&loaded(vec![post(1)]), 6, &host());
        assert_eq!(
            text,
            "Latest Blog Posts\n\nJanuary 5, 2024\nPost 1\nbody 1\n\
             Read more: https://github.com/octo/site/blob/main/blogs/post-1.md\n\n"
        );
    }

    #[test]
    fn overflow_links_to_tree_view() {
        let posts = (0..8).map(post).collect();
        let text = render_text(&loaded(posts), 6, &host());
        assert_eq!(text.matches("Read more:").count(), 6);
        assert!(text.ends_with(
            "View all posts (2 more): https://github.com/octo/site/tree/main/blogs\n"
        ));
    }

    #[test]
    fn json_mirrors_observable_state() {
        let value = render_json(&loaded(vec![post(1)]), &host());
        assert_eq!(value["loading"], json!(false));
        assert_eq!(value["error"], Value::Null);
        assert_eq!(value["posts"][0]["slug"], json!("post-1"));
        assert_eq!(
            value["posts"][0]["url"],
            json!("https://github.com/octo/site/blob/main/blogs/post-1.md")
        );
    }
}
