//! Dedup registry.
//!
//! Remembers which images and embeds were already handed out, keyed by
//! their protocol-relative form. One registry serves one suggestion build;
//! create a new one for every call.

use std::collections::HashSet;

use crate::image::{contains_avatar, upgrade_gravatar};
use crate::options::Limits;
use crate::scraped::ScrapedData;
use crate::url_utils::dedup_key;

/// Per-call record of selected images and embeds.
#[derive(Debug, Clone, Default)]
pub struct DedupRegistry {
    limits: Limits,
    images: HashSet<String>,
    embeds: HashSet<String>,
}

impl DedupRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new(limits: Limits) -> Self {
        Self {
            limits,
            images: HashSet::new(),
            embeds: HashSet::new(),
        }
    }

    /// Number of images selected so far.
    #[must_use]
    pub fn selected_images(&self) -> usize {
        self.images.len()
    }

    /// Select embeds not handed out before.
    ///
    /// The source URL goes first when it is embeddable itself.
    pub fn select_embeds(&mut self, data: &ScrapedData) -> Vec<String> {
        let sanitizer = data.sanitizer(self.limits);
        let source = data.url.as_deref().and_then(|u| sanitizer.limit_embed(u));

        let mut selected = Vec::new();
        for src in source.iter().chain(data.embeds.iter()) {
            if self.embeds.insert(dedup_key(src)) {
                selected.push(src.clone());
            }
        }
        selected
    }

    /// Select images not handed out before.
    ///
    /// The JSON-LD image goes first when it passes the noise filter. Gravatar
    /// hosts are upgraded to HTTPS. Avatar images are skipped once
    /// `avatar_flood_threshold` images have been selected.
    pub fn select_images(&mut self, data: &ScrapedData) -> Vec<String> {
        let sanitizer = data.sanitizer(self.limits);
        let mut selected = Vec::new();

        if let Some(image) = data.jsonld.image.as_deref() {
            let image = sanitizer.limit_img(image);
            if !image.is_empty() && self.images.insert(dedup_key(&image)) {
                selected.push(image);
            }
        }

        for src in &data.images {
            let src = upgrade_gravatar(src);
            let key = dedup_key(&src);
            if self.images.contains(&key)
                || (contains_avatar(&src) && self.images.len() >= self.limits.avatar_flood_threshold)
            {
                continue;
            }
            self.images.insert(key);
            selected.push(src.into_owned());
        }

        selected
    }
}
