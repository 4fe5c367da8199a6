//! Override resolution: pick the one rule that governs a date's opening
//! window.
//!
//! Three tiers are consulted in strict precedence and the first match wins:
//!
//! 1. special days (explicit date ranges),
//! 2. holidays (annual month/day ranges, wraparound-aware),
//! 3. weekly business hours.
//!
//! Tiers are never merged. A matching special day or holiday that is open
//! but carries no explicit window still wins the date; it defers only the
//! *timing* to the weekly tier while its label and comment are kept.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::interval::{clip_to_day, TimeWindow};
use crate::rules::{HolidayRule, SpecialDayRule, WeeklyHours};
use crate::source::{DaySnapshot, RuleSource};
use crate::time::{CalendarDate, ClockTime};

/// Which tier determined a date's plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    SpecialDay,
    Holiday,
    BusinessHours,
    /// No rule at all: no override matched and the weekday has no row.
    None,
}

/// The override tiers that carry a label and comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideKind {
    SpecialDay,
    Holiday,
}

/// The special day or holiday that won a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideInfo {
    pub kind: OverrideKind,
    pub rule_id: u64,
    pub label: Option<String>,
    pub comment: Option<String>,
}

impl OverrideInfo {
    fn special_day(rule: &SpecialDayRule) -> Self {
        OverrideInfo {
            kind: OverrideKind::SpecialDay,
            rule_id: rule.id,
            label: rule.label.clone(),
            comment: rule.comment.clone(),
        }
    }

    fn holiday(rule: &HolidayRule) -> Self {
        OverrideInfo {
            kind: OverrideKind::Holiday,
            rule_id: rule.id,
            label: rule.label.clone(),
            comment: rule.comment.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanSource {
    Override(OverrideInfo),
    BusinessHours,
    None,
}

impl PlanSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            PlanSource::Override(info) => match info.kind {
                OverrideKind::SpecialDay => SourceKind::SpecialDay,
                OverrideKind::Holiday => SourceKind::Holiday,
            },
            PlanSource::BusinessHours => SourceKind::BusinessHours,
            PlanSource::None => SourceKind::None,
        }
    }

    pub fn override_info(&self) -> Option<&OverrideInfo> {
        match self {
            PlanSource::Override(info) => Some(info),
            _ => None,
        }
    }

    pub fn is_override(&self) -> bool {
        self.override_info().is_some()
    }

    pub fn label(&self) -> Option<&str> {
        self.override_info().and_then(|info| info.label.as_deref())
    }

    pub fn comment(&self) -> Option<&str> {
        self.override_info().and_then(|info| info.comment.as_deref())
    }
}

/// The resolved operating status for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayPlan {
    Open { window: TimeWindow, source: PlanSource },
    Closed { source: PlanSource },
}

impl DayPlan {
    pub fn is_open(&self) -> bool {
        matches!(self, DayPlan::Open { .. })
    }

    pub fn window(&self) -> Option<TimeWindow> {
        match self {
            DayPlan::Open { window, .. } => Some(*window),
            DayPlan::Closed { .. } => None,
        }
    }

    pub fn source(&self) -> &PlanSource {
        match self {
            DayPlan::Open { source, .. } | DayPlan::Closed { source } => source,
        }
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source().kind()
    }
}

/// Outcome of an override tier that matched the date.
enum TierMatch {
    Decided(DayPlan),
    /// Open override without its own window: timing comes from business hours.
    DeferTiming(OverrideInfo),
}

/// Resolve the plan for `snapshot.date` from its already-fetched rules.
pub fn resolve_day_plan(snapshot: &DaySnapshot) -> DayPlan {
    let date = snapshot.date;
    let tier = special_day_tier(date, &snapshot.special_days)
        .or_else(|| holiday_tier(date, &snapshot.holidays));

    let carried = match tier {
        Some(TierMatch::Decided(plan)) => {
            debug!(%date, source = ?plan.source_kind(), open = plan.is_open(), "override decided day plan");
            return plan;
        }
        Some(TierMatch::DeferTiming(info)) => {
            debug!(%date, rule_id = info.rule_id, kind = ?info.kind, "override defers timing to business hours");
            Some(info)
        }
        None => None,
    };

    let plan = business_hours_tier(snapshot.weekly_hours.as_ref(), carried);
    debug!(%date, source = ?plan.source_kind(), open = plan.is_open(), "business hours tier resolved day plan");
    plan
}

/// The most specific special day containing `date`.
///
/// Preference: a single-day range, then the fewest days, then lowest id.
pub fn select_special_day(date: CalendarDate, rules: &[SpecialDayRule]) -> Option<&SpecialDayRule> {
    rules
        .iter()
        .filter(|rule| rule.range().contains(date))
        .min_by_key(|rule| {
            let range = rule.range();
            (!range.is_single_day(), range.span_days(), rule.id)
        })
}

/// The winning holiday whose month/day range contains `date`.
///
/// Preference: a single-day range, then lowest id.
pub fn select_holiday(date: CalendarDate, rules: &[HolidayRule]) -> Option<&HolidayRule> {
    let md = date.month_day();
    rules
        .iter()
        .filter(|rule| rule.range().contains(md))
        .min_by_key(|rule| (!rule.range().is_single_day(), rule.id))
}

fn special_day_tier(date: CalendarDate, rules: &[SpecialDayRule]) -> Option<TierMatch> {
    let rule = select_special_day(date, rules)?;
    let info = OverrideInfo::special_day(rule);

    if !rule.is_open {
        return Some(TierMatch::Decided(DayPlan::Closed {
            source: PlanSource::Override(info),
        }));
    }

    let Some((start, end)) = rule.explicit_window() else {
        return Some(TierMatch::DeferTiming(info));
    };
    let source = PlanSource::Override(info);

    let plan = match clip_to_day(start, end, date) {
        Some(window) => DayPlan::Open { window, source },
        None => DayPlan::Closed { source },
    };
    Some(TierMatch::Decided(plan))
}

fn holiday_tier(date: CalendarDate, rules: &[HolidayRule]) -> Option<TierMatch> {
    let rule = select_holiday(date, rules)?;
    let info = OverrideInfo::holiday(rule);

    if !rule.is_open {
        return Some(TierMatch::Decided(DayPlan::Closed {
            source: PlanSource::Override(info),
        }));
    }

    let Some((start, end)) = rule.explicit_times() else {
        return Some(TierMatch::DeferTiming(info));
    };
    let source = PlanSource::Override(info);

    let plan = match TimeWindow::between(start, end) {
        Some(window) => DayPlan::Open { window, source },
        None => {
            warn!(rule_id = rule.id, %start, %end, "holiday window is empty or inverted");
            DayPlan::Closed { source }
        }
    };
    Some(TierMatch::Decided(plan))
}

fn business_hours_tier(row: Option<&WeeklyHours>, carried: Option<OverrideInfo>) -> DayPlan {
    let Some(row) = row else {
        return DayPlan::Closed {
            source: carried.map_or(PlanSource::None, PlanSource::Override),
        };
    };
    let source = carried.map_or(PlanSource::BusinessHours, PlanSource::Override);

    if !row.is_open {
        return DayPlan::Closed { source };
    }

    let window = row
        .start_time
        .zip(row.end_time)
        .and_then(|(start, end)| TimeWindow::between(start, end));
    match window {
        Some(window) => DayPlan::Open { window, source },
        None => {
            warn!(week_day = row.week_day, "business hours row is open without a valid window");
            DayPlan::Closed { source }
        }
    }
}

/// The winning holiday for a date, as exposed by the holiday lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayInfo {
    pub id: u64,
    #[serde(rename = "holiday")]
    pub label: Option<String>,
    pub comment: Option<String>,
    pub is_open: bool,
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
}

impl From<&HolidayRule> for HolidayInfo {
    fn from(rule: &HolidayRule) -> Self {
        HolidayInfo {
            id: rule.id,
            label: rule.label.clone(),
            comment: rule.comment.clone(),
            is_open: rule.is_open,
            start_time: rule.start_time,
            end_time: rule.end_time,
        }
    }
}

/// Look up the holiday that would apply to `date`, ignoring special days and
/// business hours.
///
/// # Errors
/// Returns `AvailabilityError::InvalidInput` if `date` is not `YYYY-MM-DD`.
pub fn holiday_info<S: RuleSource + ?Sized>(date: &str, source: &S) -> Result<Option<HolidayInfo>> {
    let date = CalendarDate::parse(date)?;
    let rules = source.holidays(date);
    Ok(select_holiday(date, &rules).map(HolidayInfo::from))
}
