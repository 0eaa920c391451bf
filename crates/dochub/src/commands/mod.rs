//! CLI command implementations.

pub(crate) mod params;
pub(crate) mod serve;

pub(crate) use params::ParamsArgs;
pub(crate) use serve::ServeArgs;

use dochub_config::{Config, NavigationDepth};
use dochub_site::{FilterDepth, PathKey, Section, SectionSpec, SectionTable, Site, SiteConfig};
use dochub_storage_fs::FsStorage;

use crate::error::CliError;

/// Build the site configuration from loaded config.
pub(crate) fn site_config(config: &Config) -> Result<SiteConfig, CliError> {
    let specs = config
        .sections_resolved
        .iter()
        .map(|section| -> Result<SectionSpec, CliError> {
            Ok(SectionSpec::new(Section::new(section.id.clone())?, section.title.clone())
                .with_description(section.description.clone())
                .with_topics(section.topics.iter().cloned())
                .with_features(section.features.iter().cloned())
                .with_prefix(PathKey::new(section.prefix.clone()))
                .with_default_key(PathKey::new(section.default_key.clone()))
                .with_page_prefix(section.page_prefix.clone()))
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    Ok(SiteConfig {
        sections: SectionTable::new(specs)?,
        depth: filter_depth(config.navigation.depth),
    })
}

fn filter_depth(depth: NavigationDepth) -> FilterDepth {
    match depth {
        NavigationDepth::Shallow => FilterDepth::Shallow,
        NavigationDepth::OneLevel => FilterDepth::OneLevel,
    }
}

/// Scan the source directory and build the site.
pub(crate) fn load_site(config: &Config) -> Result<Site, CliError> {
    let storage = FsStorage::new(config.docs_resolved.source_dir.clone());
    Ok(Site::load(&storage, site_config(config)?)?)
}
