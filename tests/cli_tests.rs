//! Command-line contract tests.

use clap::error::ErrorKind;
use clap::Parser;
use rstest::rstest;

use mounter_build::cli::{Cli, Commands, ExternalStep, ShowTarget};
use mounter_build::registry::Variant;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("mounter-build").chain(args.iter().copied()))
}

#[rstest]
#[case::no_step(&["external"], ErrorKind::MissingRequiredArgument)]
#[case::two_steps(&["external", "build", "copy"], ErrorKind::UnknownArgument)]
#[case::unknown_step(&["external", "install"], ErrorKind::InvalidValue)]
#[case::wrong_case(&["external", "BUILD"], ErrorKind::InvalidValue)]
fn test_external_rejects_bad_arguments(#[case] args: &[&str], #[case] kind: ErrorKind) {
    let err = parse(args).unwrap_err();
    assert_eq!(err.kind(), kind);
}

#[rstest]
#[case::build("build", ExternalStep::Build)]
#[case::copy("copy", ExternalStep::Copy)]
fn test_external_dispatches_step(#[case] arg: &str, #[case] expected: ExternalStep) {
    let cli = parse(&["external", arg]).unwrap();
    match cli.command {
        Commands::External { step, profile } => {
            assert_eq!(step, expected);
            assert_eq!(profile.registry, Variant::Current);
            assert_eq!(profile.min_macos, None);
        }
        other => panic!("parsed into {:?}", other),
    }
}

#[test]
fn test_no_command_is_an_error() {
    assert!(parse(&[]).is_err());
}

#[test]
fn test_external_legacy_registry() {
    let cli = parse(&["external", "build", "--registry", "legacy", "--min-macos", "10.12"]).unwrap();
    let Commands::External { profile, .. } = cli.command else {
        panic!("expected external");
    };
    let profile = profile.profile();
    assert_eq!(profile.registry.variant, Variant::Legacy);
    assert_eq!(profile.toolchain.macos_version_min.as_deref(), Some("10.12"));
}

#[test]
fn test_release_takes_no_positionals() {
    let err = parse(&["release", "build"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
}

#[test]
fn test_release_zip_toggle() {
    let Commands::Release(args) = parse(&["release"]).unwrap().command else {
        panic!("expected release");
    };
    assert!(args.options().zip_app);

    let Commands::Release(args) = parse(&["release", "--no-zip"]).unwrap().command else {
        panic!("expected release");
    };
    let opts = args.options();
    assert!(!opts.zip_app);
    assert_eq!(opts.archive_path.to_str(), Some("ArchiveMounter.xcarchive"));
}

#[test]
fn test_global_flags() {
    let cli = parse(&["-vv", "--dry-run", "external", "copy"]).unwrap();
    assert_eq!(cli.verbose, 2);
    assert!(cli.dry_run);
    assert_eq!(cli.env_file, None);
}

#[test]
fn test_env_file_is_opt_in() {
    let cli = parse(&["external", "build", "--env-file", "build.env"]).unwrap();
    assert_eq!(cli.env_file.as_deref(), Some(std::path::Path::new("build.env")));
}

#[test]
fn test_show_registry_json() {
    let cli = parse(&["show", "registry", "--json", "--registry", "legacy"]).unwrap();
    match cli.command {
        Commands::Show {
            what: ShowTarget::Registry { json, profile },
        } => {
            assert!(json);
            assert_eq!(profile.registry, Variant::Legacy);
        }
        other => panic!("parsed into {:?}", other),
    }
}

#[test]
fn test_preflight_flags() {
    let cli = parse(&["preflight", "--strict", "--json"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Preflight {
            strict: true,
            json: true
        }
    ));
}
