//! ModelArts training job command handlers.

use tabled::Tabled;

use cloudext_core::Connection;
use cloudext_core::services::modelarts::{TrainingJobQuery, TrainingJobSpec, TrainingJobSummary};

use crate::cli::{GlobalOpts, ModelartsArgs, ModelartsCommand};
use crate::error::CliError;
use crate::output::{self, opt};

use super::util;

#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Created")]
    created: String,
}

fn created(job: &TrainingJobSummary) -> String {
    opt(job.created.map(|c| c.format("%Y-%m-%d %H:%M:%S")))
}

fn job_row(job: &TrainingJobSummary, color: bool) -> JobRow {
    JobRow {
        id: job.id.clone(),
        name: job.name.clone(),
        status: output::status(&job.status, color),
        created: created(job),
    }
}

fn job_detail(job: &TrainingJobSummary) -> String {
    output::detail(&[
        ("ID", job.id.clone()),
        ("Name", job.name.clone()),
        ("Status", job.status.clone()),
        ("Created", created(job)),
        ("Description", opt(job.description.as_deref())),
    ])
}

fn job_id(job: &TrainingJobSummary) -> String {
    job.id.clone()
}

pub async fn handle(
    connection: &Connection,
    args: ModelartsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let modelarts = connection.modelarts().await?;
    let color = output::should_color(&global.color);
    tracing::debug!(version = %modelarts.api_version(), "modelarts proxy bound");

    match args.command {
        ModelartsCommand::List(args) => {
            let query = TrainingJobQuery {
                filters: util::parse_pairs("filter", &args.list.filter)?
                    .into_iter()
                    .map(|(k, v)| (k.to_owned(), v))
                    .collect(),
                offset: args.offset,
                limit: args.limit,
            };
            let jobs = modelarts.list_training_jobs(&query).await?;
            let out = output::render_list(&global.output, &jobs, |j| job_row(j, color), job_id)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ModelartsCommand::Show { id } => {
            let job = modelarts.get_training_job(&id).await?;
            let out = output::render_single(&global.output, &job, job_detail, job_id)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ModelartsCommand::Create {
            name,
            flavor,
            nodes,
            code_dir,
            boot_file,
            engine,
            engine_version,
            image,
            command,
            data_url,
            train_url,
            params,
            description,
        } => {
            if code_dir.is_none() && image.is_none() {
                return Err(CliError::validation(
                    "code-dir",
                    "either --code-dir or --image is required",
                ));
            }
            let parameters = util::parse_pairs("param", &params)?
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v))
                .collect();
            let spec = TrainingJobSpec {
                name,
                description,
                flavor,
                node_count: nodes,
                code_dir,
                boot_file,
                engine,
                engine_version,
                image_url: image,
                command,
                data_url,
                train_url,
                parameters,
            };
            let job = modelarts.create_training_job(&spec).await?;
            let out = output::render_single(&global.output, &job, job_detail, job_id)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ModelartsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete training job '{id}'?"), global.yes)? {
                return Ok(());
            }
            modelarts.delete_training_job(&id).await?;
            if !global.quiet {
                eprintln!("Training job '{id}' deleted");
            }
            Ok(())
        }
    }
}
