//! Report aggregators.
//!
//! Each aggregator fetches the resources it needs and reduces them to a
//! flat record for the presentation layer. The async functions are thin
//! fetch wrappers; the record builders are pure so the reduction logic is
//! testable from sample payloads.

use crate::github::{Contributor, FetchError, GitHubClient, IssueItem, PullItem, Repository};
use crate::metrics;
use crate::tree::{build_tree, TreeNode};
use crate::types::{MetricRecord, RepoId};

/// How many contributors the social report lists.
pub const CONTRIBUTOR_DISPLAY_LIMIT: usize = 10;

const NOT_AVAILABLE: &str = "N/A";
const FALLBACK_BRANCH: &str = "main";

/// One contributor row: login and contribution count, in service order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContributorLine {
    pub login: String,
    pub contributions: u64,
}

/// Social-activity output: the metric record plus an auxiliary contributor
/// list. An empty list is the "no visible contributors" state, not an
/// error.
#[derive(Clone, Debug)]
pub struct SocialReport {
    pub record: MetricRecord,
    pub contributors: Vec<ContributorLine>,
}

impl SocialReport {
    pub fn has_visible_contributors(&self) -> bool {
        !self.contributors.is_empty()
    }
}

/// Repository-structure output: the reconstructed hierarchy and the branch
/// it was read from.
#[derive(Clone, Debug)]
pub struct StructureReport {
    pub branch: String,
    pub root: TreeNode,
}

/// Basic repository information.
pub async fn basic_info(client: &GitHubClient, id: &RepoId) -> Result<MetricRecord, FetchError> {
    let repo = client.get_repository(id).await?;
    Ok(basic_info_record(id, &repo))
}

pub fn basic_info_record(id: &RepoId, repo: &Repository) -> MetricRecord {
    let mut record = MetricRecord::new(format!("Basic information for {id}"));
    record.push("Name", text_or_na(repo.name.as_deref()));
    record.push("Description", text_or_na(repo.description.as_deref()));
    record.push("URL", text_or_na(repo.html_url.as_deref()));
    record.push(
        "Owner",
        text_or_na(repo.owner.as_ref().and_then(|o| o.login.as_deref())),
    );
    record.push("Created", text_or_na(repo.created_at.as_deref()));
    record.push("Last update", text_or_na(repo.updated_at.as_deref()));
    record.push("Last push", text_or_na(repo.pushed_at.as_deref()));
    record.push("Primary language", text_or_na(repo.language.as_deref()));
    record.push("Size", format!("{} KB", repo.size));
    record.push("Visibility", if repo.private { "Private" } else { "Public" });
    record.push("Archived", yes_no(repo.archived));
    record.push("Template", yes_no(repo.is_template));
    record.push(
        "License",
        text_or_na(repo.license.as_ref().and_then(|l| l.name.as_deref())),
    );
    record
}

/// Stars, forks, watchers, and the leading contributors.
pub async fn social_activity(
    client: &GitHubClient,
    id: &RepoId,
) -> Result<SocialReport, FetchError> {
    let repo = client.get_repository(id).await?;
    let contributors = client.get_contributors(id).await?;
    Ok(social_report(id, &repo, contributors))
}

pub fn social_report(
    id: &RepoId,
    repo: &Repository,
    contributors: Vec<Contributor>,
) -> SocialReport {
    let mut record = MetricRecord::new(format!("Social activity for {id}"));
    record.push("Stars", repo.stargazers_count);
    record.push("Forks", repo.forks_count);
    record.push("Watchers", repo.subscribers_count);

    // Service order is kept: the endpoint already ranks by contributions.
    let contributors = contributors
        .into_iter()
        .take(CONTRIBUTOR_DISPLAY_LIMIT)
        .map(|c| ContributorLine {
            login: c.login.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            contributions: c.contributions,
        })
        .collect();

    SocialReport {
        record,
        contributors,
    }
}

/// Issue and pull-request counts with average resolution times.
///
/// Four full paginated fetches, strictly one after another: open issues,
/// closed issues, open pulls, closed pulls.
pub async fn issue_turnaround(
    client: &GitHubClient,
    id: &RepoId,
) -> Result<MetricRecord, FetchError> {
    let repo = client.get_repository(id).await?;

    let issues_path = format!("repos/{}/{}/issues", id.owner, id.repo);
    let open_issues: Vec<IssueItem> = client.fetch_all(&issues_path, &[("state", "open")]).await?;
    let closed_issues: Vec<IssueItem> =
        client.fetch_all(&issues_path, &[("state", "closed")]).await?;

    let pulls_path = format!("repos/{}/{}/pulls", id.owner, id.repo);
    let open_pulls: Vec<PullItem> = client.fetch_all(&pulls_path, &[("state", "open")]).await?;
    let closed_pulls: Vec<PullItem> = client.fetch_all(&pulls_path, &[("state", "closed")]).await?;

    Ok(turnaround_record(
        id,
        &repo,
        &open_issues,
        &closed_issues,
        &open_pulls,
        &closed_pulls,
    ))
}

pub fn turnaround_record(
    id: &RepoId,
    repo: &Repository,
    open_issues: &[IssueItem],
    closed_issues: &[IssueItem],
    open_pulls: &[PullItem],
    closed_pulls: &[PullItem],
) -> MetricRecord {
    // The issues endpoint mixes pull requests in; strip them before
    // counting. The pulls endpoint returns only pull requests.
    let open_issue_count = open_issues.iter().filter(|i| !i.is_pull_request()).count();
    let closed_issues: Vec<&IssueItem> = closed_issues
        .iter()
        .filter(|i| !i.is_pull_request())
        .collect();

    let issue_intervals: Vec<i64> = closed_issues
        .iter()
        .filter_map(|i| metrics::resolution_days(i.created_at.as_deref(), i.closed_at.as_deref()))
        .collect();
    let pull_intervals: Vec<i64> = closed_pulls
        .iter()
        .filter_map(|p| metrics::resolution_days(p.created_at.as_deref(), p.closed_at.as_deref()))
        .collect();

    let mut record = MetricRecord::new(format!("Issues and pull requests in {id}"));
    record.push("Issues enabled", yes_no(repo.has_issues));
    record.push("Open issues", open_issue_count);
    record.push("Closed issues", closed_issues.len());
    record.push(
        "Average issue resolution (days)",
        metrics::average_days(&issue_intervals),
    );
    record.push("Open pull requests", open_pulls.len());
    record.push("Closed pull requests", closed_pulls.len());
    record.push(
        "Average PR resolution (days)",
        metrics::average_days(&pull_intervals),
    );
    record
}

/// The repository's file hierarchy on its default branch.
pub async fn repo_structure(
    client: &GitHubClient,
    id: &RepoId,
) -> Result<StructureReport, FetchError> {
    let repo = client.get_repository(id).await?;
    let branch = repo
        .default_branch
        .unwrap_or_else(|| FALLBACK_BRANCH.to_string());
    let entries = client.get_tree(id, &branch).await?;
    Ok(StructureReport {
        root: build_tree(&id.repo, &entries),
        branch,
    })
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn text_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
