//! Policy table inspection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use prepaccess_access::RolePolicies;
use prepaccess_core::error::AppError;
use prepaccess_entity::{FeatureAccess, UserRole};

/// Arguments for table commands
#[derive(Debug, Args)]
pub struct TableArgs {
    /// Table subcommand
    #[command(subcommand)]
    pub command: TableCommand,
}

/// Table subcommands
#[derive(Debug, Subcommand)]
pub enum TableCommand {
    /// List every role with its sections and permissions
    Roles,
    /// List every role's feature settings
    Features {
        /// Restrict to one role
        #[arg(short, long)]
        role: Option<String>,
    },
}

/// Role display row for table output
#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    /// Role name
    role: String,
    /// Accessible sections
    sections: String,
    /// Carried permissions
    permissions: String,
}

/// Feature display row for table output
#[derive(Debug, Serialize, Tabled)]
struct FeatureRow {
    /// Role name
    role: String,
    /// Feature name
    feature: String,
    /// Access setting
    access: String,
}

/// Execute table commands
pub fn execute(args: &TableArgs, format: OutputFormat) -> Result<(), AppError> {
    let policies = RolePolicies::new();

    match &args.command {
        TableCommand::Roles => {
            let rows: Vec<RoleRow> = UserRole::ALL
                .iter()
                .map(|role| RoleRow {
                    role: role.to_string(),
                    sections: policies
                        .sections_for_role(role)
                        .iter()
                        .map(|s| s.to_string())
                        .collect::<Vec<_>>()
                        .join(", "),
                    permissions: policies
                        .permissions_for_role(role)
                        .iter()
                        .map(|p| p.to_string())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
                .collect();
            output::print_list(&rows, format);
        }
        TableCommand::Features { role } => {
            let roles: Vec<UserRole> = match role {
                Some(name) => vec![name.parse()?],
                None => UserRole::ALL.to_vec(),
            };

            let mut rows = Vec::new();
            for role in &roles {
                let Some(policy) = policies.policy_for(role) else {
                    continue;
                };
                let mut features: Vec<_> = policy.features.iter().collect();
                features.sort_by(|a, b| a.0.cmp(b.0));
                for (name, access) in features {
                    rows.push(FeatureRow {
                        role: role.to_string(),
                        feature: name.clone(),
                        access: render_access(access),
                    });
                }
            }
            output::print_list(&rows, format);
        }
    }

    Ok(())
}

fn render_access(access: &FeatureAccess) -> String {
    match access {
        FeatureAccess::Enabled(true) => "enabled".to_string(),
        FeatureAccess::Enabled(false) => "disabled".to_string(),
        FeatureAccess::Tiers(tiers) => tiers
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", "),
    }
}
