//! Author model

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Author primary key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorId(pub Uuid);

impl AuthorId {
	pub fn new() -> Self {
		Self(Uuid::new_v4())
	}
}

impl Default for AuthorId {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Display for AuthorId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Author entity
///
/// Authors have no lifecycle of their own beyond being referenced by articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
	pub id: AuthorId,
	pub name: Option<String>,
}

impl Author {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			id: AuthorId::new(),
			name: Some(name.into()),
		}
	}

	/// Reference stored on an article
	pub fn reference(&self) -> AuthorRef {
		AuthorRef {
			id: self.id,
			name: self.name.clone(),
		}
	}
}

/// Foreign reference from an article to its author (id + display name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
	pub id: AuthorId,
	pub name: Option<String>,
}
