use chrono::Local;
use clap::Args;
use senate_directory::config::{AppConfig, DataConfig};
use senate_directory::directory::report::summarize;
use senate_directory::directory::report::views::DirectorySummary;
use senate_directory::directory::{
    Category, Directory, DirectoryLoader, DirectorySession, LegislatorDetail, LegislatorId,
    SortField,
};
use senate_directory::error::AppError;
use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct SourceArgs {
    /// Roster document to load instead of DIRECTORY_RECORDS_PATH
    #[arg(long)]
    pub(crate) records: Option<PathBuf>,
    /// Image-source map to load instead of DIRECTORY_IMAGES_PATH
    #[arg(long)]
    pub(crate) images: Option<PathBuf>,
}

impl SourceArgs {
    pub(crate) fn apply(self, data: &mut DataConfig) {
        if let Some(records) = self.records {
            data.records_path = records;
        }
        if let Some(images) = self.images {
            data.images_path = images;
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct ListArgs {
    /// Keep legislators of this party (repeatable)
    #[arg(long)]
    pub(crate) party: Vec<String>,
    /// Keep legislators from this state (repeatable)
    #[arg(long)]
    pub(crate) state: Vec<String>,
    /// Keep legislators with this seniority rank (repeatable)
    #[arg(long)]
    pub(crate) rank: Vec<String>,
    /// Keep legislators of this gender (repeatable)
    #[arg(long)]
    pub(crate) gender: Vec<String>,
    /// Keep legislators whose first or last name starts with this text
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Field to sort by (last_name, first_name, state, party)
    #[arg(long)]
    pub(crate) sort: Option<String>,
    /// Times to click the sort toggle: 1 ascending, 2 descending, 3 source order
    #[arg(long, default_value_t = 1)]
    pub(crate) sort_clicks: u8,
    #[command(flatten)]
    pub(crate) sources: SourceArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ShowArgs {
    /// Legislator identifier (bioguide id)
    pub(crate) id: String,
    #[command(flatten)]
    pub(crate) sources: SourceArgs,
}

pub(crate) async fn run_list(args: ListArgs) -> Result<(), AppError> {
    let directory = load_directory(args.sources.clone()).await?;
    let session = filtered_session(directory, &args)?;
    print!("{}", format_listing(&session));
    Ok(())
}

pub(crate) async fn run_summary(args: SourceArgs) -> Result<(), AppError> {
    let directory = load_directory(args).await?;
    print!("{}", format_summary(&summarize(directory.legislators())));
    Ok(())
}

pub(crate) async fn run_show(args: ShowArgs) -> Result<(), AppError> {
    let directory = load_directory(args.sources).await?;
    let legislator = directory
        .get(&LegislatorId::new(args.id.as_str()))
        .ok_or_else(|| AppError::NotFound(format!("legislator {}", args.id)))?;
    print!(
        "{}",
        format_detail(&LegislatorDetail::from_legislator(legislator))
    );
    Ok(())
}

async fn load_directory(sources: SourceArgs) -> Result<Arc<Directory>, AppError> {
    let mut config = AppConfig::load()?;
    sources.apply(&mut config.data);

    let today = Local::now().date_naive();
    let directory =
        DirectoryLoader::from_paths(&config.data.records_path, &config.data.images_path, today)
            .await?;
    Ok(Arc::new(directory))
}

pub(crate) fn filtered_session(
    directory: Arc<Directory>,
    args: &ListArgs,
) -> Result<DirectorySession, AppError> {
    let mut session = DirectorySession::open(directory)?;

    let selections = [
        (Category::Party, &args.party),
        (Category::State, &args.state),
        (Category::Rank, &args.rank),
        (Category::Gender, &args.gender),
    ];
    for (category, values) in selections {
        for value in values {
            session.toggle_filter(category.key(), value, true)?;
        }
    }

    if let Some(name) = &args.name {
        session.search_name(name)?;
    }

    if let Some(raw) = &args.sort {
        let field = SortField::parse(raw)
            .ok_or_else(|| AppError::BadRequest(format!("unknown sort field '{raw}'")))?;
        for _ in 0..args.sort_clicks {
            session.click_sort(field)?;
        }
    }

    Ok(session)
}

pub(crate) fn format_listing(session: &DirectorySession) -> String {
    let visible = session.visible();
    let mut out = String::new();
    writeln!(
        out,
        "{} of {} legislators",
        visible.len(),
        session.deck().len()
    )
    .expect("write listing");
    if let Some((field, direction)) = session.sort().active() {
        writeln!(out, "Sorted by {} ({})", field.label(), direction.label())
            .expect("write listing");
    }
    for legislator in visible {
        writeln!(
            out,
            "- {:<10} {:<28} {:<12} {:<3} {:<7} {}",
            legislator.id.as_str(),
            format!("{}, {}", legislator.last_name, legislator.first_name),
            legislator.party,
            legislator.state,
            legislator.rank,
            legislator.gender
        )
        .expect("write listing");
    }
    out
}

pub(crate) fn format_summary(summary: &DirectorySummary) -> String {
    let mut out = String::new();
    writeln!(out, "Senate directory summary ({} legislators)", summary.total)
        .expect("write summary");
    for entry in &summary.party_counts {
        writeln!(out, "- {}: {}", entry.label, entry.count).expect("write summary");
    }
    writeln!(
        out,
        "Gender: {}% female | {}% male",
        summary.gender.female_pct, summary.gender.male_pct
    )
    .expect("write summary");
    match summary.average_age {
        Some(age) => {
            writeln!(out, "Average age: {age}").expect("write summary");
        }
        None => {
            writeln!(out, "Average age: unknown").expect("write summary");
        }
    }
    out.push_str("Years in office:\n");
    for bar in &summary.years_in_office.bars {
        writeln!(out, "  {:>3} yrs | {}", bar.years, "#".repeat(bar.count)).expect("write summary");
    }
    for group in &summary.leaders {
        if group.leaders.is_empty() {
            continue;
        }
        writeln!(out, "{} leadership:", group.heading).expect("write summary");
        for leader in &group.leaders {
            writeln!(out, "  - {}: {}", leader.title, leader.name).expect("write summary");
        }
    }
    out
}

pub(crate) fn format_detail(detail: &LegislatorDetail) -> String {
    let mut out = String::new();
    writeln!(out, "{} [{}]", detail.display_name, detail.id).expect("write detail");
    writeln!(out, "{}", detail.biography).expect("write detail");
    if let Some(office) = &detail.office {
        writeln!(out, "Office: {office}").expect("write detail");
    }
    if let Some(phone) = &detail.phone {
        writeln!(out, "Phone: {phone}").expect("write detail");
    }
    for link in &detail.links {
        writeln!(out, "{}: {}", link.kind, link.href).expect("write detail");
    }
    out
}
