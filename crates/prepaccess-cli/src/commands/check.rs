//! Offline access checks against the static policy table.
//!
//! Checks run with a no-op escalation backend, so a verdict here reflects
//! the static table only. Anything the server would escalate (custom
//! conditions, resource-scoped rules) is reported as allowed.

use std::sync::Arc;

use clap::{Args, Subcommand};
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use prepaccess_access::{AccessEvaluator, RolePolicies, StaticEscalationBackend};
use prepaccess_core::error::AppError;
use prepaccess_entity::{Section, SubscriptionTier, UserAccessContext, UserRole};

/// Arguments for check commands
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Check subcommand
    #[command(subcommand)]
    pub command: CheckCommand,
}

/// Check subcommands
#[derive(Debug, Subcommand)]
pub enum CheckCommand {
    /// Check a permission for a role and tier
    Permission {
        /// Acting role
        #[arg(short, long)]
        role: String,
        /// Subscription tier
        #[arg(short, long, default_value = "FREE")]
        tier: String,
        /// Permission to check
        #[arg(short, long)]
        permission: String,
        /// Optional resource identifier
        #[arg(long)]
        resource: Option<String>,
    },
    /// Check section access for a role
    Section {
        /// Acting role
        #[arg(short, long)]
        role: String,
        /// Target section
        #[arg(long)]
        target: String,
    },
    /// Check a product feature for a role and tier
    Feature {
        /// Acting role
        #[arg(short, long)]
        role: String,
        /// Subscription tier
        #[arg(short, long, default_value = "FREE")]
        tier: String,
        /// Feature name
        #[arg(long)]
        feature: String,
    },
}

/// Execute check commands
pub async fn execute(args: &CheckArgs, format: OutputFormat) -> Result<(), AppError> {
    let policies = Arc::new(RolePolicies::new());
    let evaluator = AccessEvaluator::without_cache(
        Arc::clone(&policies),
        Arc::new(StaticEscalationBackend::allowing()),
    );

    let verdict = match &args.command {
        CheckCommand::Permission {
            role,
            tier,
            permission,
            resource,
        } => {
            let ctx = build_context(&policies, role, tier)?;
            evaluator
                .check_permission(&ctx, permission.parse()?, resource.as_deref())
                .await
        }
        CheckCommand::Section { role, target } => {
            let ctx = build_context(&policies, role, "FREE")?;
            let target: Section = target.parse()?;
            evaluator.check_section_access(&ctx, target).await
        }
        CheckCommand::Feature {
            role,
            tier,
            feature,
        } => {
            let ctx = build_context(&policies, role, tier)?;
            evaluator.check_feature_access(&ctx, feature).await
        }
    };

    output::print_item(&verdict, format);

    if !verdict.allowed {
        std::process::exit(2);
    }
    Ok(())
}

fn build_context(
    policies: &RolePolicies,
    role: &str,
    tier: &str,
) -> Result<UserAccessContext, AppError> {
    let role: UserRole = role.parse()?;
    let tier: SubscriptionTier = tier.parse()?;
    let permissions = policies.permissions_for_role(&role);
    Ok(UserAccessContext::new(Uuid::new_v4(), role, tier, permissions))
}
