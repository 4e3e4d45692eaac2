//! RAII guard that closes a page when dropped.

use std::ops::Deref;

use super::PageHandle;

/// Owns an open page and closes it on drop, whatever path the lookup takes.
pub struct PageGuard {
    page: Box<dyn PageHandle>,
}

impl PageGuard {
    pub fn new(page: Box<dyn PageHandle>) -> Self {
        Self { page }
    }
}

impl Deref for PageGuard {
    type Target = dyn PageHandle;

    fn deref(&self) -> &Self::Target {
        self.page.as_ref()
    }
}

impl Drop for PageGuard {
    fn drop(&mut self) {
        if let Err(err) = self.page.close() {
            tracing::warn!("{err}");
        }
    }
}
