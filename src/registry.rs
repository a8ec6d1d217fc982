//! Pinned sources of the bundled FUSE helpers.
//!
//! Two registries exist. `current` is what ships today; `legacy` is the older
//! pin set that still builds on machines without the 10.10 deployment target
//! workaround. They are deliberately not reconciled.

use serde::Serialize;

use crate::config::Toolchain;
use crate::error::BuildError;

/// RAR archive library (tarball).
pub const UNRAR: &str = "unrar";
/// RAR FUSE filesystem.
pub const RAR2FS: &str = "rar2fs";
/// ZIP library.
pub const LIBZIP: &str = "libzip";
/// ZIP FUSE filesystem.
pub const FUSE_ZIP: &str = "fuse-zip";

/// Deployment target of the current pin set.
pub const CURRENT_MACOS_VERSION_MIN: &str = "10.10";

/// Version control system a repository is cloned with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vcs {
    Git,
    #[serde(rename = "hg")]
    Mercurial,
}

impl Vcs {
    /// Executable name.
    pub fn program(self) -> &'static str {
        match self {
            Vcs::Git => "git",
            Vcs::Mercurial => "hg",
        }
    }

    /// Subcommand that applies a single commit on top of the checkout.
    pub fn pick_subcommand(self) -> &'static str {
        match self {
            Vcs::Git => "cherry-pick",
            Vcs::Mercurial => "graft",
        }
    }
}

/// Where a component's sources come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Origin {
    /// Download and extract; the URL itself pins the version.
    Tarball { url: &'static str },
    /// Clone, check out `version`, then apply `cherry_picks` in order.
    Repository {
        vcs: Vcs,
        url: &'static str,
        version: &'static str,
        cherry_picks: Vec<&'static str>,
    },
}

/// Fetch configuration of one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub name: &'static str,
    #[serde(flatten)]
    pub origin: Origin,
}

impl Source {
    fn tarball(name: &'static str, url: &'static str) -> Self {
        Self {
            name,
            origin: Origin::Tarball { url },
        }
    }

    fn repository(name: &'static str, vcs: Vcs, url: &'static str, version: &'static str) -> Self {
        Self {
            name,
            origin: Origin::Repository {
                vcs,
                url,
                version,
                cherry_picks: Vec::new(),
            },
        }
    }

    fn cherry_pick(mut self, commit: &'static str) -> Self {
        if let Origin::Repository { cherry_picks, .. } = &mut self.origin {
            cherry_picks.push(commit);
        }
        self
    }

    /// Short human-readable pin, e.g. `v1.27.1 +1`.
    pub fn pin(&self) -> String {
        match &self.origin {
            Origin::Tarball { url } => url.rsplit('/').next().unwrap_or(url).to_string(),
            Origin::Repository {
                version,
                cherry_picks,
                ..
            } if cherry_picks.is_empty() => version.to_string(),
            Origin::Repository {
                version,
                cherry_picks,
                ..
            } => format!("{} +{}", version, cherry_picks.len()),
        }
    }
}

/// Which pin set to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Current,
    Legacy,
}

/// Component name -> fetch configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registry {
    pub variant: Variant,
    pub sources: Vec<Source>,
}

impl Registry {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Current => Self::current(),
            Variant::Legacy => Self::legacy(),
        }
    }

    pub fn current() -> Self {
        Self {
            variant: Variant::Current,
            sources: vec![
                Source::tarball(UNRAR, "https://www.rarlab.com/rar/unrarsrc-5.6.8.tar.gz"),
                Source::repository(RAR2FS, Vcs::Git, "https://github.com/hasse69/rar2fs", "v1.27.1"),
                Source::repository(LIBZIP, Vcs::Git, "https://github.com/nih-at/libzip", "rel-1-5-1")
                    .cherry_pick("49b35508503812dbac5286d3f6dda53cdb7b7b59"),
                Source::repository(
                    FUSE_ZIP,
                    Vcs::Mercurial,
                    "https://bitbucket.org/agalanin/fuse-zip",
                    "0.5.0",
                ),
            ],
        }
    }

    pub fn legacy() -> Self {
        Self {
            variant: Variant::Legacy,
            sources: vec![
                Source::tarball(UNRAR, "https://www.rarlab.com/rar/unrarsrc-5.6.2.tar.gz"),
                Source::repository(RAR2FS, Vcs::Git, "https://github.com/hasse69/rar2fs", "v1.26.0")
                    .cherry_pick("1d6bf47979d9d15a0d4cfc48ddaee5a8716e88a9"),
                Source::repository(LIBZIP, Vcs::Git, "https://github.com/nih-at/libzip", "rel-1-5-0"),
                Source::repository(
                    FUSE_ZIP,
                    Vcs::Mercurial,
                    "https://bitbucket.org/agalanin/fuse-zip",
                    "0.4.5",
                ),
            ],
        }
    }

    /// Look up a component. Unknown names are a configuration error.
    pub fn get(&self, name: &str) -> Result<&Source, BuildError> {
        self.sources
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| BuildError::UnknownComponent(name.to_string()))
    }

    /// Print the registry as a table.
    pub fn print(&self) {
        println!("Registry ({:?}):", self.variant);
        for source in &self.sources {
            let url = match &source.origin {
                Origin::Tarball { url } => *url,
                Origin::Repository { url, .. } => *url,
            };
            println!("  {:<10} {:<28} {}", source.name, source.pin(), url);
        }
    }
}

/// Registry plus the compiler settings that go with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub registry: Registry,
    pub toolchain: Toolchain,
}

impl Profile {
    /// The pin set and its matching toolchain. `min_macos` replaces the
    /// variant's deployment target when given.
    pub fn new(variant: Variant, min_macos: Option<String>) -> Self {
        let toolchain = match (variant, min_macos) {
            (_, Some(version)) => Toolchain::with_min_version(version),
            (Variant::Current, None) => Toolchain::with_min_version(CURRENT_MACOS_VERSION_MIN),
            (Variant::Legacy, None) => Toolchain::default(),
        };
        Self {
            registry: Registry::for_variant(variant),
            toolchain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_variants_cover_all_components() {
        for registry in [Registry::current(), Registry::legacy()] {
            for name in [UNRAR, RAR2FS, LIBZIP, FUSE_ZIP] {
                assert!(registry.get(name).is_ok(), "{:?} lacks {}", registry.variant, name);
            }
            assert_eq!(registry.sources.len(), 4);
        }
    }

    #[test]
    fn test_unknown_component_fails() {
        let err = Registry::current().get("unzip").unwrap_err();
        assert!(matches!(err, BuildError::UnknownComponent(ref n) if n == "unzip"));
    }

    #[test]
    fn test_current_pins() {
        let registry = Registry::current();
        assert_eq!(
            registry.get(UNRAR).unwrap().origin,
            Origin::Tarball {
                url: "https://www.rarlab.com/rar/unrarsrc-5.6.8.tar.gz"
            }
        );
        match &registry.get(LIBZIP).unwrap().origin {
            Origin::Repository {
                vcs,
                version,
                cherry_picks,
                ..
            } => {
                assert_eq!(*vcs, Vcs::Git);
                assert_eq!(*version, "rel-1-5-1");
                assert_eq!(cherry_picks, &vec!["49b35508503812dbac5286d3f6dda53cdb7b7b59"]);
            }
            other => panic!("libzip should be a repository, got {:?}", other),
        }
    }

    #[test]
    fn test_legacy_pins() {
        let registry = Registry::legacy();
        assert_eq!(registry.get(RAR2FS).unwrap().pin(), "v1.26.0 +1");
        assert_eq!(registry.get(LIBZIP).unwrap().pin(), "rel-1-5-0");
        assert_eq!(registry.get(FUSE_ZIP).unwrap().pin(), "0.4.5");
        assert_eq!(registry.get(UNRAR).unwrap().pin(), "unrarsrc-5.6.2.tar.gz");
    }

    #[test]
    fn test_fuse_zip_uses_mercurial() {
        match &Registry::current().get(FUSE_ZIP).unwrap().origin {
            Origin::Repository { vcs, .. } => {
                assert_eq!(vcs.program(), "hg");
                assert_eq!(vcs.pick_subcommand(), "graft");
            }
            other => panic!("fuse-zip should be a repository, got {:?}", other),
        }
    }

    #[test]
    fn test_profile_toolchains() {
        let current = Profile::new(Variant::Current, None);
        assert_eq!(current.toolchain.macos_version_min.as_deref(), Some("10.10"));

        let legacy = Profile::new(Variant::Legacy, None);
        assert_eq!(legacy.toolchain.macos_version_min, None);

        let custom = Profile::new(Variant::Legacy, Some("10.13".to_string()));
        assert_eq!(custom.toolchain.macos_version_min.as_deref(), Some("10.13"));
        assert_eq!(custom.registry.variant, Variant::Legacy);
    }

    #[test]
    fn test_registry_serializes() {
        let json = serde_json::to_value(Registry::current()).unwrap();
        assert_eq!(json["variant"], "current");
        assert_eq!(json["sources"][0]["kind"], "tarball");
        assert_eq!(json["sources"][3]["vcs"], "hg");
        assert_eq!(json["sources"][1]["version"], "v1.27.1");
    }
}
