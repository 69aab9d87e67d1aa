//! Pre-save normalization
//!
//! Derives `slug` from `title` and `sanitized_html` from `markdown`, then checks
//! the required fields. The only way to obtain a [`NormalizedArticle`] is
//! [`normalize`], and the document store only accepts `NormalizedArticle`s,
//! so no save can skip this step.

use std::ops::Deref;

use crate::error::{ArticleError, Result};
use crate::models::ArticleRecord;

/// URL-safe slug for `title`
///
/// Lowercases, transliterates non-ASCII text and collapses every run of
/// characters outside `[a-z0-9]` into a single `-`. Returns `None` when
/// nothing usable remains.
///
/// # Examples
///
/// ```rust
/// use scriptorium_articles::normalize::slugify;
///
/// assert_eq!(slugify("Hello World!").as_deref(), Some("hello-world"));
/// assert_eq!(slugify("!!!"), None);
/// ```
pub fn slugify(title: &str) -> Option<String> {
	let slug = slug::slugify(title);
	if slug.is_empty() { None } else { Some(slug) }
}

/// Render markdown to HTML and sanitize the result
///
/// Raw HTML inside the markdown is passed through by the renderer and then
/// filtered by the sanitizer, so safe formatting markup survives while
/// scripts, event handler attributes and `javascript:` URLs are removed.
pub fn render_html(markdown: &str) -> Result<String> {
	let mut options = markdown::Options::gfm();
	options.compile.allow_dangerous_html = true;
	// Raw HTML is left for the sanitizer to strip
	options.compile.gfm_tagfilter = false;

	let html = markdown::to_html_with_options(markdown, &options)
		.map_err(|e| ArticleError::Render(e.to_string()))?;

	Ok(ammonia::clean(&html))
}

/// Article whose derived fields were recomputed and whose required fields are present
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedArticle(ArticleRecord);

impl NormalizedArticle {
	/// Slug of the article; always present after normalization
	pub fn slug(&self) -> &str {
		self.0.slug().unwrap_or_default()
	}

	pub fn into_inner(self) -> ArticleRecord {
		self.0
	}
}

impl Deref for NormalizedArticle {
	type Target = ArticleRecord;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Recompute derived fields and validate required ones
///
/// An empty title leaves any previous slug untouched, and an empty body leaves
/// any previous HTML untouched; the required-field check then fails on the
/// empty source field.
///
/// # Errors
///
/// Returns `ArticleError::RequiredFieldMissing` for an empty `title`, an empty
/// `markdown`, or a title that yields no slug.
pub fn normalize(mut article: ArticleRecord) -> Result<NormalizedArticle> {
	let slug = if article.title.trim().is_empty() {
		None
	} else {
		slugify(&article.title)
	};

	let sanitized_html = if article.markdown.trim().is_empty() {
		None
	} else {
		Some(render_html(&article.markdown)?)
	};

	let slug_derived = slug.is_some();
	article.set_derived(slug, sanitized_html);

	if article.title.trim().is_empty() {
		return Err(ArticleError::RequiredFieldMissing { field: "title" });
	}
	if article.markdown.trim().is_empty() {
		return Err(ArticleError::RequiredFieldMissing { field: "markdown" });
	}
	if !slug_derived {
		return Err(ArticleError::RequiredFieldMissing { field: "slug" });
	}
	if article.sanitized_html().is_none() {
		return Err(ArticleError::RequiredFieldMissing {
			field: "sanitized_html",
		});
	}

	Ok(NormalizedArticle(article))
}
