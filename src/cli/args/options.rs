use adwiz::client::EntityKind;
use clap::ValueEnum;

/// Audience categories accepted via the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum EntityKindArg {
    #[clap(name = "work-position")]
    WorkPosition,
    Interest,
    Employer,
}

impl EntityKindArg {
    pub(crate) fn kind(self) -> EntityKind {
        match self {
            EntityKindArg::WorkPosition => EntityKind::WorkPosition,
            EntityKindArg::Interest => EntityKind::Interest,
            EntityKindArg::Employer => EntityKind::Employer,
        }
    }
}

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}
