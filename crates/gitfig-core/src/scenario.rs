use crate::DiagramConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Seed used when the caller does not pick one. The ids are illustrative, so a
/// fixed seed keeps re-renders byte-for-byte identical.
pub const DEFAULT_SEED: u64 = 42;

const MAIN_COMMIT_COUNT: usize = 3;
const COMMIT_ID_LEN: usize = 7;
const HEX_DIGITS: &[u8] = b"0123456789abcdef";

/// One synthetic entry of a history panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub kind: String,
}

/// One row of a working-tree / staging table: an indented file label plus a
/// version-stack count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRow {
    pub depth: usize,
    pub label: String,
    pub versions: usize,
}

/// Everything the layout pass needs to draw one repository block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoContents {
    pub title: String,
    pub repo_name: String,
    pub branches: Vec<String>,
    pub active_branch: String,
    pub commits: Vec<CommitRecord>,
    pub local: bool,
}

impl RepoContents {
    /// Fixed illustrative file tree; the version stacks track the commit count.
    pub fn file_rows(&self) -> Vec<FileRow> {
        let versions = self.commits.len();
        vec![
            FileRow {
                depth: 0,
                label: format!("{}/", self.repo_name),
                versions: 0,
            },
            FileRow {
                depth: 1,
                label: "src/".to_string(),
                versions: 0,
            },
            FileRow {
                depth: 2,
                label: "main.c".to_string(),
                versions,
            },
            FileRow {
                depth: 1,
                label: "README.md".to_string(),
                versions,
            },
        ]
    }

    pub fn working_tree_title(&self) -> String {
        format!("{} Working Tree", self.repo_name)
    }

    pub fn staging_title(&self) -> &'static str {
        ".git (Index & Staging Area)"
    }
}

/// The fully-expanded clone scenario: header lines plus two or three repository
/// blocks, all synthetic data already materialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloneScenario {
    pub syntax_line: String,
    pub command_line: String,
    pub description: String,
    pub operation_label: String,
    pub remote: RepoContents,
    pub local: RepoContents,
    pub third: Option<RepoContents>,
}

impl CloneScenario {
    /// Expands a configuration into the scenario, drawing all commit ids from a
    /// single seeded stream: the shared remote/local commits first, then the
    /// third repository's.
    pub fn from_config(cfg: &DiagramConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let commits = synthesize_commits(&mut rng, MAIN_COMMIT_COUNT);
        let third_commits = cfg
            .third_repo
            .as_ref()
            .map(|t| synthesize_commits(&mut rng, t.commits));

        let branches = vec![cfg.remote_def_branch.clone()];
        let remote_url = cfg.remote_url();
        let local_repo = cfg.local_repo_path();

        let remote = RepoContents {
            title: format!("Remote Repository {}", cfg.remote_server),
            repo_name: cfg.remote_repo_name.clone(),
            branches: branches.clone(),
            active_branch: cfg.remote_def_branch.clone(),
            commits: commits.clone(),
            local: false,
        };
        let local = RepoContents {
            title: format!("Local: {local_repo}"),
            repo_name: cfg.remote_repo_name.clone(),
            branches: branches.clone(),
            active_branch: cfg.remote_def_branch.clone(),
            commits,
            local: true,
        };
        let third = cfg.third_repo.as_ref().map(|t| {
            let branches = t.branches.clone().unwrap_or_else(|| branches.clone());
            let active = branches.first().cloned().unwrap_or_default();
            RepoContents {
                title: t.title.clone(),
                repo_name: t
                    .repo_name
                    .clone()
                    .unwrap_or_else(|| cfg.remote_repo_name.clone()),
                branches,
                active_branch: active,
                commits: third_commits.unwrap_or_default(),
                local: false,
            }
        });

        tracing::debug!(
            seed,
            third = third.is_some(),
            "expanded config into clone scenario"
        );

        Self {
            syntax_line: "git clone <URL> [dir]".to_string(),
            command_line: format!("{}>git clone {remote_url}", cfg.local_base_dir),
            description: format!(
                "Creates the local repository at {local_repo}, sets up the origin remote, \
                 fetches objects and refs, and checks out the default branch {}.",
                cfg.remote_def_branch
            ),
            operation_label: "clone".to_string(),
            remote,
            local,
            third,
        }
    }
}

/// Draws `n` seven-digit lowercase hex commit ids from `rng`.
pub fn synthesize_commits(rng: &mut StdRng, n: usize) -> Vec<CommitRecord> {
    (0..n)
        .map(|_| {
            let id = (0..COMMIT_ID_LEN)
                .map(|_| HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char)
                .collect::<String>();
            CommitRecord {
                id,
                kind: "commit".to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ThirdRepoConfig;

    fn base_config() -> DiagramConfig {
        DiagramConfig {
            remote_server: "git.example.com".to_string(),
            remote_user: "alice".to_string(),
            remote_repo_name: "webapp".to_string(),
            local_base_dir: "/home/alice/dev".to_string(),
            local_repo_name: "webapp".to_string(),
            remote_def_branch: "main".to_string(),
            third_repo: None,
        }
    }

    #[test]
    fn commit_ids_are_seven_hex_digits() {
        let mut rng = StdRng::seed_from_u64(DEFAULT_SEED);
        let commits = synthesize_commits(&mut rng, 5);
        assert_eq!(commits.len(), 5);
        for c in &commits {
            assert_eq!(c.id.len(), 7);
            assert!(c.id.chars().all(|ch| ch.is_ascii_hexdigit() && !ch.is_ascii_uppercase()));
            assert_eq!(c.kind, "commit");
        }
    }

    #[test]
    fn same_seed_same_scenario() {
        let cfg = base_config();
        let a = CloneScenario::from_config(&cfg, DEFAULT_SEED);
        let b = CloneScenario::from_config(&cfg, DEFAULT_SEED);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_changes_commit_ids() {
        let cfg = base_config();
        let a = CloneScenario::from_config(&cfg, 1);
        let b = CloneScenario::from_config(&cfg, 2);
        assert_ne!(a.remote.commits, b.remote.commits);
    }

    #[test]
    fn remote_and_local_share_commits() {
        let cfg = base_config();
        let s = CloneScenario::from_config(&cfg, DEFAULT_SEED);
        assert_eq!(s.remote.commits, s.local.commits);
        assert_eq!(s.remote.commits.len(), 3);
        assert!(!s.remote.local);
        assert!(s.local.local);
    }

    #[test]
    fn third_repo_draws_from_the_same_stream() {
        let mut cfg = base_config();
        cfg.third_repo = Some(ThirdRepoConfig {
            title: "Fork".to_string(),
            repo_name: None,
            branches: None,
            commits: 2,
        });
        let s = CloneScenario::from_config(&cfg, DEFAULT_SEED);
        let third = s.third.expect("third repo");
        assert_eq!(third.commits.len(), 2);
        assert_eq!(third.repo_name, "webapp");
        assert_eq!(third.branches, vec!["main".to_string()]);

        // The main commits come first in the stream, so they match the
        // two-repo rendering of the same config.
        let mut plain = base_config();
        plain.third_repo = None;
        let s2 = CloneScenario::from_config(&plain, DEFAULT_SEED);
        assert_eq!(s.remote.commits, s2.remote.commits);
    }

    #[test]
    fn file_rows_track_commit_count() {
        let cfg = base_config();
        let s = CloneScenario::from_config(&cfg, DEFAULT_SEED);
        let rows = s.remote.file_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].label, "webapp/");
        assert_eq!(rows[2].versions, 3);
        assert_eq!(rows[3].versions, 3);
    }

    #[test]
    fn header_lines_embed_config_values() {
        let cfg = base_config();
        let s = CloneScenario::from_config(&cfg, DEFAULT_SEED);
        assert_eq!(
            s.command_line,
            "/home/alice/dev>git clone git@git.example.com:alice/webapp.git"
        );
        assert!(s.description.contains("/home/alice/dev/webapp"));
        assert!(s.description.ends_with("main."));
    }
}
