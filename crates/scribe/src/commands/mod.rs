//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod render;

pub(crate) use build::BuildArgs;
pub(crate) use render::RenderArgs;

use scribe_config::Config;
use scribe_site::{PrefixResolver, Site, SiteError, load_partials};

/// Build the rendering context described by a loaded configuration.
pub(crate) fn site_from_config(config: &Config) -> Result<Site, SiteError> {
    let partials = load_partials(&config.source_resolved.partials_dir)?;
    Ok(Site::new(partials)
        .with_assets(PrefixResolver::new(config.assets.images_url.clone()))
        .with_max_partial_depth(config.render_resolved.max_partial_depth))
}
