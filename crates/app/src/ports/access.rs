//! Access port — the capability check consulted before any use-case runs.
//!
//! The core never depends on a concrete implementation; the HTTP adapter
//! calls [`AccessPolicy::check`] with whatever credential the request carried.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

/// Why a request was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("an API key is required")]
    MissingCredential,
    #[error("invalid API key")]
    InvalidCredential,
}

/// Decides whether a caller presenting `credential` may proceed.
pub trait AccessPolicy {
    fn check(
        &self,
        credential: Option<&str>,
    ) -> impl Future<Output = Result<(), AccessDenied>> + Send;
}

impl<T: AccessPolicy + Send + Sync> AccessPolicy for Arc<T> {
    fn check(
        &self,
        credential: Option<&str>,
    ) -> impl Future<Output = Result<(), AccessDenied>> + Send {
        (**self).check(credential)
    }
}

/// Lets every request through.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowAll;

impl AccessPolicy for AllowAll {
    async fn check(&self, _credential: Option<&str>) -> Result<(), AccessDenied> {
        Ok(())
    }
}

/// Accepts only keys from a fixed list.
#[derive(Debug, Default, Clone)]
pub struct StaticKeys {
    keys: HashSet<String>,
}

impl StaticKeys {
    #[must_use]
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    fn verify(&self, credential: Option<&str>) -> Result<(), AccessDenied> {
        match credential {
            None => Err(AccessDenied::MissingCredential),
            Some(key) if self.keys.contains(key) => Ok(()),
            Some(_) => Err(AccessDenied::InvalidCredential),
        }
    }
}

impl AccessPolicy for StaticKeys {
    async fn check(&self, credential: Option<&str>) -> Result<(), AccessDenied> {
        self.verify(credential)
    }
}

/// Either policy, picked at startup from configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredAccess {
    Open(AllowAll),
    Keys(StaticKeys),
}

impl ConfiguredAccess {
    /// Open access when `keys` is empty, otherwise a [`StaticKeys`] check.
    #[must_use]
    pub fn from_keys(keys: &[String]) -> Self {
        if keys.is_empty() {
            Self::Open(AllowAll)
        } else {
            Self::Keys(StaticKeys::new(keys.iter().cloned()))
        }
    }
}

impl AccessPolicy for ConfiguredAccess {
    async fn check(&self, credential: Option<&str>) -> Result<(), AccessDenied> {
        match self {
            Self::Open(_) => Ok(()),
            Self::Keys(keys) => keys.verify(credential),
        }
    }
}
