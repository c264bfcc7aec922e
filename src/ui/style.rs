//! Badge colors and number formatting shared by the views.

use eframe::egui::{Color32, RichText};

use crate::models::{JobSchedule, JobStatus, MuscleGroup};

/// Neutral badge for values outside the known options.
const NEUTRAL: (Color32, Color32) = (Color32::from_rgb(243, 244, 246), Color32::from_rgb(31, 41, 55));

pub fn muscle_colors(group: &MuscleGroup) -> (Color32, Color32) {
    match group {
        MuscleGroup::Chest => (Color32::from_rgb(254, 226, 226), Color32::from_rgb(153, 27, 27)),
        MuscleGroup::Back => (Color32::from_rgb(219, 234, 254), Color32::from_rgb(30, 64, 175)),
        MuscleGroup::Legs => (Color32::from_rgb(220, 252, 231), Color32::from_rgb(22, 101, 52)),
        MuscleGroup::Shoulders => (Color32::from_rgb(243, 232, 255), Color32::from_rgb(107, 33, 168)),
        MuscleGroup::Biceps => (Color32::from_rgb(255, 237, 213), Color32::from_rgb(154, 52, 18)),
        MuscleGroup::Triceps => (Color32::from_rgb(252, 231, 243), Color32::from_rgb(157, 23, 77)),
        MuscleGroup::Forearms => (Color32::from_rgb(254, 249, 195), Color32::from_rgb(133, 77, 14)),
        MuscleGroup::Abs => (Color32::from_rgb(224, 231, 255), Color32::from_rgb(55, 48, 163)),
        MuscleGroup::Cardio => (Color32::from_rgb(207, 250, 254), Color32::from_rgb(21, 94, 117)),
        MuscleGroup::Other(_) => NEUTRAL,
    }
}

pub fn status_colors(status: &JobStatus) -> (Color32, Color32) {
    match status {
        JobStatus::Applied => (Color32::from_rgb(219, 234, 254), Color32::from_rgb(30, 64, 175)),
        JobStatus::Interviewing => (Color32::from_rgb(243, 232, 255), Color32::from_rgb(107, 33, 168)),
        JobStatus::Offer => (Color32::from_rgb(220, 252, 231), Color32::from_rgb(22, 101, 52)),
        JobStatus::Rejected => (Color32::from_rgb(254, 226, 226), Color32::from_rgb(153, 27, 27)),
        JobStatus::Accepted => (Color32::from_rgb(209, 250, 229), Color32::from_rgb(6, 95, 70)),
        JobStatus::Other(_) => NEUTRAL,
    }
}

pub fn schedule_colors(schedule: &JobSchedule) -> (Color32, Color32) {
    match schedule {
        JobSchedule::FullTime => (Color32::from_rgb(224, 231, 255), Color32::from_rgb(55, 48, 163)),
        JobSchedule::PartTime => (Color32::from_rgb(255, 237, 213), Color32::from_rgb(154, 52, 18)),
        JobSchedule::Contract => (Color32::from_rgb(207, 250, 254), Color32::from_rgb(21, 94, 117)),
        JobSchedule::Freelance => (Color32::from_rgb(252, 231, 243), Color32::from_rgb(157, 23, 77)),
        JobSchedule::Internship => (Color32::from_rgb(204, 251, 241), Color32::from_rgb(17, 94, 89)),
        JobSchedule::Other(_) => NEUTRAL,
    }
}

pub fn badge(text: &str, (background, foreground): (Color32, Color32)) -> RichText {
    RichText::new(format!(" {text} "))
        .background_color(background)
        .color(foreground)
        .strong()
}

/// Renders `value` with comma thousands separators and at most two decimals.
pub fn group_thousands(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let whole = rounded.abs().trunc() as u64;
    let cents = ((rounded.abs().fract() * 100.0).round()) as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = if negative { format!("-{grouped}") } else { grouped };
    if cents > 0 {
        let frac = format!("{cents:02}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(4050.0), "4,050");
        assert_eq!(group_thousands(1_234_567.0), "1,234,567");
        assert_eq!(group_thousands(2362.5), "2,362.5");
        assert_eq!(group_thousands(999.25), "999.25");
    }

    #[test]
    fn unknown_values_get_neutral_badge() {
        assert_eq!(muscle_colors(&MuscleGroup::Other("Glutes".into())), NEUTRAL);
        assert_eq!(status_colors(&JobStatus::Other("Ghosted".into())), NEUTRAL);
        assert_ne!(schedule_colors(&JobSchedule::Contract), NEUTRAL);
    }
}
