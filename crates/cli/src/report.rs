use std::fmt;

use liftplan_domain::{ExerciseBlock, WorkoutPlan, round_to_tenth};

const RULE_WIDTH: usize = 30;

/// Human-readable rendering of a workout plan.
pub struct Report<'a>(pub &'a WorkoutPlan);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.0;

        writeln!(f, "WORKOUT PLAN")?;
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f, "Total Duration: {} minutes", plan.total_duration_minutes)?;
        writeln!(f)?;

        section(f, &format!("WARMUP ({} minutes)", plan.warmup.duration_minutes()))?;
        writeln!(f, "• Cardio: {} minutes", plan.warmup.cardio.duration_minutes)?;
        writeln!(f, "  {}", plan.warmup.cardio.activity)?;
        writeln!(
            f,
            "• Dynamic Stretching: {} minutes",
            plan.warmup.stretching.duration_minutes
        )?;
        writeln!(f, "  {}", plan.warmup.stretching.activity)?;
        writeln!(f)?;

        section(f, "MAIN EXERCISES")?;
        for (i, block) in plan.exercises.iter().enumerate() {
            write_block(f, i + 1, block)?;
        }

        let summary = &plan.summary;
        section(f, "WORKOUT SUMMARY")?;
        writeln!(f, "Total exercises: {}", summary.exercises_count)?;
        writeln!(f, "Total sets: {}", summary.total_sets)?;
        writeln!(
            f,
            "Exercise time: {:.1} minutes",
            summary.total_exercise_time_minutes
        )?;
        writeln!(f)?;
        writeln!(f, "Muscle group breakdown:")?;
        for (group, seconds) in &summary.muscle_group_breakdown {
            writeln!(
                f,
                "  • {}: {:.1} minutes",
                title_case(group),
                round_to_tenth(seconds / 60.0)
            )?;
        }

        Ok(())
    }
}

fn section(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(RULE_WIDTH))
}

fn write_block(f: &mut fmt::Formatter<'_>, number: usize, block: &ExerciseBlock) -> fmt::Result {
    writeln!(
        f,
        "{number}. {} ({})",
        block.name,
        block.muscle_group.to_uppercase()
    )?;
    writeln!(f, "   Sets: {}", block.sets)?;
    writeln!(
        f,
        "   Work: {}s | Rest: {}s",
        block.set_duration_sec, block.rest_duration_sec
    )?;
    writeln!(
        f,
        "   Total time: {}s ({:.1} min)",
        block.total_time_sec,
        round_to_tenth(block.total_time_sec / 60.0)
    )?;
    if let Some(notes) = block.notes.as_deref().filter(|n| !n.is_empty()) {
        writeln!(f, "   Notes: {notes}")?;
    }
    if let Some(link) = block.link.as_deref().filter(|l| !l.is_empty()) {
        writeln!(f, "   Video: {link}")?;
    }
    writeln!(f)
}

/// Capitalize the first letter of every word. Any character that is not a letter starts
/// a new word.
fn title_case(value: &str) -> String {
    let mut title = String::with_capacity(value.len());
    let mut in_word = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            if in_word {
                title.extend(c.to_lowercase());
            } else {
                title.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            title.push(c);
            in_word = false;
        }
    }

    title
}
