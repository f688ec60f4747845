//! Check-time condition evaluators.
//!
//! Time, location, and device conditions evaluate locally against the
//! request context and fail closed when the context lacks the field they
//! need. Custom conditions are delegated to the auth backend.

use chrono::Timelike;

use prepaccess_entity::{
    AccessCondition, AccessVerdict, DeviceKind, UserAccessContext, Weekday,
};

use crate::backend::EscalationBackend;

/// Evaluates one condition against the context.
pub(crate) async fn evaluate(
    ctx: &UserAccessContext,
    condition: &AccessCondition,
    backend: &dyn EscalationBackend,
) -> AccessVerdict {
    match condition {
        AccessCondition::Time {
            start_hour,
            end_hour,
            days,
        } => evaluate_time(ctx, *start_hour, *end_hour, days),
        AccessCondition::Location { allowed_countries } => {
            evaluate_location(ctx, allowed_countries)
        }
        AccessCondition::Device { allowed } => evaluate_device(ctx, allowed),
        AccessCondition::Custom { .. } => match backend.evaluate_condition(ctx, condition).await {
            Ok(true) => AccessVerdict::allow(),
            Ok(false) => AccessVerdict::deny(
                "Condition d'accès non satisfaite",
                "Access condition not met",
            ),
            Err(err) => {
                tracing::warn!(
                    user_id = %ctx.user_id,
                    error = %err,
                    "custom condition evaluation failed, denying"
                );
                AccessVerdict::deny(
                    "Erreur lors de l'évaluation de la condition",
                    "Error while evaluating the condition",
                )
            }
        },
    }
}

/// UTC hour-window check. `start == end` is an empty window; `start > end`
/// wraps past midnight.
fn evaluate_time(
    ctx: &UserAccessContext,
    start_hour: u8,
    end_hour: u8,
    days: &[Weekday],
) -> AccessVerdict {
    let hour = ctx.request_time.hour() as u8;
    let in_window = if start_hour < end_hour {
        hour >= start_hour && hour < end_hour
    } else {
        start_hour != end_hour && (hour >= start_hour || hour < end_hour)
    };

    let day_ok = days.is_empty()
        || days.contains(&Weekday::from_chrono(chrono::Datelike::weekday(
            &ctx.request_time,
        )));

    if in_window && day_ok {
        AccessVerdict::allow()
    } else {
        AccessVerdict::deny(
            "Accès non autorisé à cette heure",
            "Access not allowed at this time",
        )
    }
}

fn evaluate_location(ctx: &UserAccessContext, allowed_countries: &[String]) -> AccessVerdict {
    let allowed = ctx
        .country
        .as_deref()
        .map(|country| {
            allowed_countries
                .iter()
                .any(|c| c.eq_ignore_ascii_case(country))
        })
        // Unknown origin fails closed
        .unwrap_or(false);

    if allowed {
        AccessVerdict::allow()
    } else {
        AccessVerdict::deny(
            "Accès non autorisé depuis votre localisation",
            "Access not allowed from your location",
        )
    }
}

fn evaluate_device(ctx: &UserAccessContext, allowed: &[DeviceKind]) -> AccessVerdict {
    let device_ok = ctx
        .user_agent
        .as_deref()
        .map(|ua| allowed.contains(&DeviceKind::classify(ua)))
        // Unknown device fails closed
        .unwrap_or(false);

    if device_ok {
        AccessVerdict::allow()
    } else {
        AccessVerdict::deny(
            "Accès non autorisé depuis cet appareil",
            "Access not allowed from this device",
        )
    }
}
