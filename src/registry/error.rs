use thiserror::Error;

/// Failure in one of the fallible stages of a registration pass. The pass
/// is all-or-nothing, so whichever stage fails first aborts the rest and
/// no registry snapshot is published.
#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("clearing previously registered commands failed")]
    ClearCommands(#[source] serenity::Error),

    #[error("submitting {count} command descriptors failed")]
    SetCommands {
        count: usize,
        #[source]
        source: serenity::Error,
    },

    #[error("granting role access to `{command}` failed")]
    SetPermissions {
        command: String,
        #[source]
        source: serenity::Error,
    },
}
