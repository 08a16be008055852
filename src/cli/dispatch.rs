//! Command dispatch logic extracted from binary to reduce main function size.

use super::args::{Cli, Commands};
use super::handlers::{
    handle_apply, handle_clusters, handle_spaces, handle_suggest, ApplyArgs, Session,
};
use crate::exit::ScoutExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if configuration is invalid or the command handler fails.
pub fn execute(cli: Cli) -> Result<ScoutExit> {
    let mut session = Session::from_cli(&cli)?;

    match cli.command {
        Commands::Spaces { json } => handle_spaces(&session, json),
        Commands::Clusters { space, json } => handle_clusters(&session, &space, json),
        Commands::Suggest {
            space,
            cluster,
            min_confidence,
            all,
            json,
        } => {
            if let Some(min) = min_confidence {
                session.config.selection.min_confidence = min;
                session.config.validate()?;
            }
            let threshold = (!all).then_some(session.config.selection.min_confidence);
            handle_suggest(&session, &space, cluster.as_deref(), threshold, json)
        }
        Commands::Apply {
            space,
            selection,
            out,
            dry_run,
            update_snapshot,
            json,
        } => handle_apply(
            &session,
            &ApplyArgs {
                space,
                selection,
                out,
                dry_run,
                update_snapshot,
                json,
            },
        ),
    }
}
