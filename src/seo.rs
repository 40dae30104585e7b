use serde_json::{json, Value};

use crate::config::WidgetSettings;
use crate::posts::{ImageSizer, Post};

pub const SCHEMA_SCRIPT_ID: &str = "sitemap-schema";

/// schema.org graph for the rendered collection: the CollectionPage, the
/// WebSite, and one BlogPosting per post.
pub fn collection_schema(posts: &[Post], collection: &str, settings: &WidgetSettings) -> Value {
    let page_url = settings.page_url();
    let blog_url = settings.blog_url.trim_end_matches('/');
    let website_id = format!("{blog_url}#website");

    let has_part: Vec<Value> = posts
        .iter()
        .enumerate()
        .map(|(index, post)| {
            json!({
                "@type": "BlogPosting",
                "@id": format!("{}#blogpost", post.url),
                "position": index + 1,
            })
        })
        .collect();

    let mut graph = vec![
        json!({
            "@type": "CollectionPage",
            "@id": format!("{page_url}#collection"),
            "url": page_url,
            "name": format!("{collection} - {}", settings.site_name),
            "description": format!("Collection of blog posts about {collection} on {}", settings.site_name),
            "isPartOf": { "@id": website_id },
            "hasPart": has_part,
        }),
        json!({
            "@type": "WebSite",
            "@id": website_id,
            "url": blog_url,
            "name": settings.site_name,
            "potentialAction": {
                "@type": "SearchAction",
                "target": format!("{blog_url}/search?q={{search_term_string}}"),
                "query-input": "required name=search_term_string",
            },
        }),
    ];
    graph.extend(posts.iter().map(|post| blog_posting(post, collection, settings)));

    json!({
        "@context": "https://schema.org",
        "@graph": graph,
    })
}

fn blog_posting(post: &Post, collection: &str, settings: &WidgetSettings) -> Value {
    let blog_url = settings.blog_url.trim_end_matches('/');
    let mut node = json!({
        "@type": "BlogPosting",
        "@id": format!("{}#blogpost", post.url),
        "headline": post.title,
        "url": post.url,
        "mainEntityOfPage": { "@type": "WebPage", "@id": post.url },
        "author": { "@type": "Person", "name": post.author },
        "publisher": {
            "@type": "Organization",
            "name": settings.site_name,
            "logo": { "@type": "ImageObject", "url": format!("{blog_url}/logo.png") },
        },
        "description": post.excerpt,
        "keywords": post.labels.join(", "),
        "articleSection": collection,
        "inLanguage": settings.language,
    });

    if let Value::Object(fields) = &mut node {
        if post.thumbnail != settings.placeholder_thumbnail {
            let sizer = ImageSizer::new(settings.image_size);
            fields.insert(
                "image".into(),
                json!({
                    "@type": "ImageObject",
                    "url": post.thumbnail,
                    "width": sizer.width,
                    "height": sizer.height(),
                }),
            );
        }
        if let Some(published) = &post.published {
            fields.insert("datePublished".into(), json!(published.to_rfc3339()));
        }
        if let Some(updated) = &post.updated {
            fields.insert("dateModified".into(), json!(updated.to_rfc3339()));
        }
    }
    node
}
