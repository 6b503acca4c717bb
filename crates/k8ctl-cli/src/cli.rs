//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use k8ctl_proto::ResponseFormat;

/// Manage and deploy applications in a K8 cluster.
///
/// A command line client for deploying and managing applications and
/// releases in a cluster/namespace.
#[derive(Parser, Debug, Clone)]
#[command(name = "k8ctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default is $HOME/.k8ctl.yaml).
    #[arg(short, long, env = "K8CTL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Cluster to access (required for every server command).
    #[arg(short = 'l', long, env = "K8CTL_CLUSTER", global = true)]
    pub cluster: Option<String>,

    /// Per-request timeout in seconds. No timeout when omitted.
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Response format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// JSON text rendered by the server.
    Json,
    /// YAML text rendered by the server.
    Yaml,
}

impl From<Format> for ResponseFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => Self::Json,
            Format::Yaml => Self::Yaml,
        }
    }
}

/// Maps an optional `--format` onto the server's response format.
#[must_use]
pub fn response_format(format: Option<Format>) -> ResponseFormat {
    format.map(ResponseFormat::from).unwrap_or_default()
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Display and manage helm releases.
    Releases {
        /// Release subcommand to execute.
        #[command(subcommand)]
        command: ReleaseCommands,
    },

    /// Display and restart deployments.
    Deployments {
        /// Deployment subcommand to execute.
        #[command(subcommand)]
        command: DeploymentCommands,
    },

    /// Display running pods.
    Pods {
        /// Pod subcommand to execute.
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Display jobs.
    Jobs {
        /// Job subcommand to execute.
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Display cronjobs.
    Cronjobs {
        /// Cronjob subcommand to execute.
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Display ingresses.
    Ingresses {
        /// Ingress subcommand to execute.
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Display services.
    Services {
        /// Service subcommand to execute.
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Display configmaps.
    Configmaps {
        /// Configmap subcommand to execute.
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Display secrets.
    Secrets {
        /// Secret subcommand to execute.
        #[command(subcommand)]
        command: ResourceCommands,
    },

    /// Usage guide for the application, including valid namespaces and
    /// resource names.
    Guide,

    /// Version of the application.
    Version,
}

/// Release subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum ReleaseCommands {
    /// List releases in a namespace.
    List {
        /// Namespace to list: dev, qa etc.
        #[arg(short, long)]
        namespace: String,

        /// Format (optional: json|yaml).
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },

    /// Deploy or refresh a release by applying a helm chart into a namespace.
    Deploy {
        /// Chart to deploy.
        chart: String,

        /// Namespace to deploy to: dev, qa etc.
        #[arg(short, long)]
        namespace: String,

        /// Docker image tag.
        #[arg(short, long)]
        tag: String,

        /// Information to display in slack etc.
        #[arg(short, long)]
        memo: String,
    },

    /// Display the status of a release, including deployments, services,
    /// ingresses etc.
    Status {
        /// Release name.
        release: String,

        /// Namespace of the release.
        #[arg(short, long)]
        namespace: String,

        /// Format (optional: json|yaml).
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },

    /// Delete a release from the cluster.
    Delete {
        /// Release name.
        release: String,

        /// Namespace of the release.
        #[arg(short, long)]
        namespace: String,
    },

    /// Roll a release back to the previous revision or one of your choosing.
    Rollback {
        /// Release name.
        release: String,

        /// Namespace of the release.
        #[arg(short, long)]
        namespace: String,

        /// A previous release revision.
        #[arg(short, long, default_value = "0")]
        revision: String,
    },

    /// Display the history of a release, including failed deploys.
    History {
        /// Release name.
        release: String,

        /// Namespace of the release.
        #[arg(short, long)]
        namespace: String,

        /// Format (optional: json|yaml).
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },
}

/// Deployment subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum DeploymentCommands {
    /// List deployments in a namespace.
    List {
        /// Namespace to report.
        #[arg(short, long)]
        namespace: String,

        /// Format (optional: json|yaml).
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },

    /// Display details of a deployment.
    Describe {
        /// Deployment name.
        name: String,

        /// Namespace to report.
        #[arg(short, long)]
        namespace: String,
    },

    /// Restart all pods under a deployment.
    Restart {
        /// Deployment name.
        name: String,

        /// Namespace of the deployment.
        #[arg(short, long)]
        namespace: String,
    },
}

/// Subcommands shared by the read-only resource kinds.
#[derive(Subcommand, Debug, Clone)]
pub enum ResourceCommands {
    /// List resources in a namespace.
    List {
        /// Namespace to report.
        #[arg(short, long)]
        namespace: String,

        /// Format (optional: json|yaml).
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },

    /// Display details of one resource.
    Describe {
        /// Resource name.
        name: String,

        /// Namespace to report.
        #[arg(short, long)]
        namespace: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // Test that the CLI can be constructed and help works
    #[test]
    fn cli_help_does_not_panic() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_release_list_with_format() {
        let cli = Cli::parse_from([
            "k8ctl", "-l", "nyc", "releases", "list", "-n", "dev", "-f", "yaml",
        ]);
        assert_eq!(cli.cluster.as_deref(), Some("nyc"));
        match cli.command {
            Commands::Releases {
                command: ReleaseCommands::List { namespace, format },
            } => {
                assert_eq!(namespace, "dev");
                assert_eq!(format, Some(Format::Yaml));
            }
            _ => panic!("expected releases list command"),
        }
    }

    #[test]
    fn parse_release_deploy() {
        let cli = Cli::parse_from([
            "k8ctl", "releases", "deploy", "--cluster", "nyc", "--namespace", "dev", "--tag",
            "k8-1.0.0-1234", "-m", "a boring bug.", "acme/app",
        ]);
        match cli.command {
            Commands::Releases {
                command:
                    ReleaseCommands::Deploy {
                        chart,
                        namespace,
                        tag,
                        memo,
                    },
            } => {
                assert_eq!(chart, "acme/app");
                assert_eq!(namespace, "dev");
                assert_eq!(tag, "k8-1.0.0-1234");
                assert_eq!(memo, "a boring bug.");
            }
            _ => panic!("expected releases deploy command"),
        }
        assert_eq!(cli.cluster.as_deref(), Some("nyc"));
    }

    #[test]
    fn deploy_requires_tag_and_memo() {
        let result = Cli::try_parse_from(["k8ctl", "releases", "deploy", "-n", "dev", "app"]);
        assert!(result.is_err());
    }

    #[test]
    fn rollback_revision_defaults_to_zero() {
        let cli = Cli::parse_from(["k8ctl", "releases", "rollback", "-n", "dev", "rel1"]);
        match cli.command {
            Commands::Releases {
                command: ReleaseCommands::Rollback { revision, .. },
            } => assert_eq!(revision, "0"),
            _ => panic!("expected releases rollback command"),
        }
    }

    #[test]
    fn namespace_is_required() {
        let result = Cli::try_parse_from(["k8ctl", "pods", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_deployment_restart() {
        let cli = Cli::parse_from(["k8ctl", "deployments", "restart", "-n", "qa", "api"]);
        match cli.command {
            Commands::Deployments {
                command: DeploymentCommands::Restart { name, namespace },
            } => {
                assert_eq!(name, "api");
                assert_eq!(namespace, "qa");
            }
            _ => panic!("expected deployments restart command"),
        }
    }

    #[test]
    fn parse_secret_describe() {
        let cli = Cli::parse_from(["k8ctl", "secrets", "describe", "-n", "prod", "db-creds"]);
        match cli.command {
            Commands::Secrets {
                command: ResourceCommands::Describe { name, namespace },
            } => {
                assert_eq!(name, "db-creds");
                assert_eq!(namespace, "prod");
            }
            _ => panic!("expected secrets describe command"),
        }
    }

    #[test]
    fn every_read_only_kind_has_list_and_describe() {
        for sub in [
            "pods",
            "jobs",
            "cronjobs",
            "ingresses",
            "services",
            "configmaps",
            "secrets",
        ] {
            assert!(Cli::try_parse_from(["k8ctl", sub, "list", "-n", "dev"]).is_ok(), "{sub}");
            assert!(
                Cli::try_parse_from(["k8ctl", sub, "describe", "-n", "dev", "x"]).is_ok(),
                "{sub}"
            );
            assert!(Cli::try_parse_from(["k8ctl", sub, "restart", "-n", "dev", "x"]).is_err());
        }
    }

    #[test]
    fn parse_timeout_and_config() {
        let cli = Cli::parse_from([
            "k8ctl", "--timeout", "5", "-c", "/etc/k8ctl.yaml", "guide",
        ]);
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.config, Some(PathBuf::from("/etc/k8ctl.yaml")));
    }

    #[test]
    fn missing_format_is_server_default() {
        assert_eq!(response_format(None), ResponseFormat::Text);
        assert_eq!(response_format(Some(Format::Json)), ResponseFormat::Json);
    }
}
