use sd_auth::Capability;
use sd_core::drafts::NewReport;
use sd_core::entities::{Report, ReportSummary};
use sd_core::enums::{ReportState, ReportType};
use sd_store::{Change, ReportsView};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct ReportDetail {
    #[serde(flatten)]
    report: Report,
    state: ReportState,
    summary: Option<ReportSummary>,
}

impl From<Report> for ReportDetail {
    fn from(report: Report) -> Self {
        Self {
            state: report.state(),
            summary: report.summary(),
            report,
        }
    }
}

/// Handle `sdesk report`.
pub async fn handle(
    action: &ReportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let reports = &ctx.stores.reports;
    match action {
        ReportCommands::List { project } => {
            ctx.require_login()?;
            let mut filter = ctx.filter();
            if let Some(project) = project {
                filter = filter.project(*project);
            }
            output(&reports.fetch_all(&filter).await?, flags.format)
        }
        ReportCommands::Get { id } => {
            ctx.require_login()?;
            let report = reports.fetch_one(*id).await?;
            output(&ReportDetail::from(report), flags.format)
        }
        ReportCommands::Create {
            project,
            report_type,
            wait,
        } => {
            ctx.require(Capability::GenerateReport)?;
            let draft = NewReport {
                project: *project,
                report_type: parse_enum::<ReportType>(report_type, "report type")?,
            };
            let view = ctx.coordinator.reports_view();
            let report = ctx.coordinator.create_report(&view, &draft).await?;
            if !*wait {
                return output(&ReportDetail::from(report), flags.format);
            }
            wait_until_ready(ctx, &view).await?;
            let ready = reports.get(report.id).unwrap_or(report);
            output(&ReportDetail::from(ready), flags.format)
        }
        ReportCommands::Watch => {
            ctx.require_login()?;
            let view = ctx.coordinator.reports_view();
            view.open().await?;
            wait_until_ready(ctx, &view).await?;
            output(&view.store().items(), flags.format)
        }
    }
}

/// Block on the view's poll loop, reporting each report as it turns ready.
/// Ctrl-C stops polling.
async fn wait_until_ready(ctx: &AppContext, view: &ReportsView) -> anyhow::Result<()> {
    if !view.is_polling() {
        return Ok(());
    }
    let pending = view.store().items().iter().filter(|r| r.is_pending()).count();
    let progress = Progress::spinner(&format!("waiting for {pending} pending report(s)"));
    let mut events = ctx.stores.subscribe();

    let settled = view.settled();
    tokio::pin!(settled);
    loop {
        tokio::select! {
            () = &mut settled => break,
            event = events.recv() => {
                if let Ok(event) = event {
                    if let Change::ReportReady { id } = event.change {
                        progress.set_message(&format!("report {id} ready"));
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                progress.finish_clear();
                anyhow::bail!("interrupted; report polling stopped");
            }
        }
    }
    if view.store().any(Report::is_pending) {
        progress.finish_clear();
        anyhow::bail!("report polling stopped before all reports were ready; run `sdesk auth login`");
    }
    progress.finish_ok("all reports ready");
    Ok(())
}
