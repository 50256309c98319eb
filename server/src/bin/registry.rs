use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use sqlx::SqlitePool;

use server::config::loader::load_with_discovery;
use server::db::init_pool;
use server::organization::mutations::{CreateOrganizationInput, create_organization};
use server::project::models::ProjectType;
use server::project::mutations::{
    CreateProjectInput, DeleteProjectInput, UpdateProjectSlugInput, create_project,
    delete_project, update_project_slug,
};

#[derive(Parser)]
#[command(name = "registry")]
#[command(about = "Registry CLI - Manage organizations and projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    Org(OrgCommands),
    #[command(subcommand)]
    Project(ProjectCommands),
}

#[derive(Subcommand)]
enum OrgCommands {
    /// Create a new organization
    Create {
        /// Organization slug (lowercase, alphanumeric, hyphens only)
        slug: String,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// Create a new project with its default targets
    Create {
        /// Owning organization slug
        #[arg(short, long)]
        org: String,
        /// Project display name; the slug is derived from it
        name: String,
        /// Project type: single, federation or stitching
        #[arg(long, default_value = "single")]
        project_type: String,
    },
    /// Change a project's slug (the display name follows it)
    Rename {
        /// Owning organization slug
        #[arg(short, long)]
        org: String,
        /// Current project slug
        project: String,
        /// New slug
        slug: String,
    },
    /// Delete a project and its targets
    Delete {
        /// Owning organization slug
        #[arg(short, long)]
        org: String,
        /// Project slug
        project: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = load_with_discovery()?;
    let (pool, _db_root_path) = init_pool(&config.database).await?;

    match cli.command {
        Commands::Org(org_cmd) => match org_cmd {
            OrgCommands::Create { slug } => create_org(&pool, slug).await?,
        },
        Commands::Project(project_cmd) => match project_cmd {
            ProjectCommands::Create {
                org,
                name,
                project_type,
            } => create_proj(&pool, org, name, project_type).await?,
            ProjectCommands::Rename { org, project, slug } => {
                rename_proj(&pool, org, project, slug).await?
            }
            ProjectCommands::Delete { org, project } => delete_proj(&pool, org, project).await?,
        },
    }

    Ok(())
}

fn parse_project_type(value: &str) -> Result<ProjectType> {
    match value {
        "single" => Ok(ProjectType::Single),
        "federation" => Ok(ProjectType::Federation),
        "stitching" => Ok(ProjectType::Stitching),
        other => bail!("unknown project type: {other}"),
    }
}

async fn create_org(pool: &SqlitePool, slug: String) -> Result<()> {
    let result = create_organization(pool, CreateOrganizationInput { slug })
        .await
        .map_err(|e| anyhow::anyhow!(e.message))?;

    if let Some(error) = result.error {
        bail!("{}", error.message);
    }
    let Some(ok) = result.ok else {
        bail!("mutation returned neither ok nor error");
    };
    let organization = ok.created_organization.0;

    println!("✓ Organization created successfully!");
    println!("  ID:   {}", organization.id);
    println!("  Slug: {}", organization.slug);

    Ok(())
}

async fn create_proj(
    pool: &SqlitePool,
    org: String,
    name: String,
    project_type: String,
) -> Result<()> {
    let project_type = parse_project_type(&project_type)?;
    let result = create_project(
        pool,
        CreateProjectInput {
            organization: org,
            name,
            project_type,
        },
    )
    .await
    .map_err(|e| anyhow::anyhow!(e.message))?;

    if let Some(error) = result.error {
        bail!("{}", error.message);
    }
    let Some(ok) = result.ok else {
        bail!("mutation returned neither ok nor error");
    };
    let project = ok.created_project.0;

    println!("✓ Project created successfully!");
    println!("  ID:   {}", project.id);
    println!("  Slug: {}", project.slug);
    println!("  Name: {}", project.name);
    for target in ok.created_targets {
        println!("  Target: {}", target.0.slug);
    }

    Ok(())
}

async fn rename_proj(pool: &SqlitePool, org: String, project: String, slug: String) -> Result<()> {
    let result = update_project_slug(
        pool,
        UpdateProjectSlugInput {
            organization: org,
            project,
            slug,
        },
    )
    .await
    .map_err(|e| anyhow::anyhow!(e.message))?;

    if let Some(error) = result.error {
        bail!("{}", error.message);
    }
    let Some(ok) = result.ok else {
        bail!("mutation returned neither ok nor error");
    };

    println!("✓ Project renamed successfully!");
    println!("  Slug: {}", ok.project.0.slug);
    println!("  Name: {}", ok.project.0.name);

    Ok(())
}

async fn delete_proj(pool: &SqlitePool, org: String, project: String) -> Result<()> {
    let result = delete_project(
        pool,
        DeleteProjectInput {
            organization: org,
            project,
        },
    )
    .await
    .map_err(|e| anyhow::anyhow!(e.message))?;

    if let Some(error) = result.error {
        bail!("{}", error.message);
    }
    let Some(ok) = result.ok else {
        bail!("mutation returned neither ok nor error");
    };

    println!("✓ Project deleted!");
    println!("  Slug: {}", ok.deleted_project.0.slug);

    Ok(())
}
