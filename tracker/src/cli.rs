use anyhow::{Context as _, anyhow};
use args::{Args, Command};
use futures::future::join_all;
use log::info;

use crate::{
    app_state::AppState,
    comparison::{DocumentSummary, VersionComparison},
    errors::{TrackerError, client_error, init_error, not_found_error, storage_error},
    registry::TrackedDocument,
    server::create_server,
    terminal::{format_audit, format_comparison, format_history, format_rules},
};

pub mod args;
pub mod color_when;

pub async fn run(args: Args) -> Result<(), TrackerError> {
    let state = AppState::try_new(&args.config)
        .await
        .context("Failed to initialise app state")
        .map_err(init_error)?;

    match args.command {
        Command::Rules => print!("{}", format_rules(&state.registry)),
        Command::Audit { rule_id, all } => {
            let documents = if all {
                state.registry.iter().collect()
            } else {
                vec![tracked_document(&state, rule_id.as_deref().unwrap_or_default())?]
            };
            audit(&state, &documents).await?;
        }
        Command::History { rule_id } => {
            let history = state.database.history(&rule_id).await.map_err(storage_error)?;
            let summary = DocumentSummary::from(history.as_slice());
            print!("{}", format_history(&history, &summary));
        }
        Command::Show { version_id } => {
            println!("{}", state.database.text_of(version_id).await?);
        }
        Command::Diff {
            rule_id,
            from,
            to,
            context,
            full,
        } => {
            let context = if full {
                None
            } else {
                Some(context.unwrap_or(state.config.display.context_lines))
            };
            let comparison = VersionComparison::for_rule(
                &state.database,
                &rule_id,
                from,
                to,
                context,
                &state.config.display,
            )
            .await?;

            print!(
                "{}",
                format_comparison(&comparison, state.config.display.column_width)
            );
        }
        Command::Reset { rule_id, yes } => {
            if !yes {
                return Err(client_error(anyhow!(
                    "Refusing to delete the history of rule `{rule_id}` without --yes"
                )));
            }

            let deleted = state
                .database
                .reset_history(&rule_id)
                .await
                .map_err(storage_error)?;
            println!("Deleted {deleted} versions of rule `{rule_id}`");
        }
        Command::Serve => {
            create_server(state)
                .await
                .context("Failed to start server")
                .map_err(init_error)?;
        }
    }

    Ok(())
}

fn tracked_document<'a>(
    state: &'a AppState,
    rule_id: &str,
) -> Result<&'a TrackedDocument, TrackerError> {
    state
        .registry
        .get(rule_id)
        .ok_or_else(|| not_found_error(anyhow!("Rule `{rule_id}` is not tracked")))
}

/// Audits the documents concurrently and prints each outcome. Neither a
/// rejected fetch nor a storage error hides the outcome of the others.
async fn audit(state: &AppState, documents: &[&TrackedDocument]) -> Result<(), TrackerError> {
    info!("Auditing {} rules", documents.len());

    let outcomes = join_all(
        documents
            .iter()
            .map(|document| state.detector.audit(&state.fetcher, document)),
    )
    .await;

    let (output, first_error) = format_audit(documents.iter().copied().zip(outcomes));
    print!("{output}");

    first_error.map_or(Ok(()), Err)
}
