//! Shared utilities for commands

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use cursor_id_reset::cursor::process::{RelaunchOutcome, TerminateOutcome};
use cursor_id_reset::cursor::{FormatDescriptor, LetterCase, TelemetryIds};

/// Short description of an identifier shape, e.g. `uuid 8-4-4-4-12 lower`
pub fn describe_format(format: &FormatDescriptor) -> String {
    match format {
        FormatDescriptor::Uuid {
            segment_lengths,
            case,
        } => {
            let lengths: Vec<String> = segment_lengths.iter().map(|l| l.to_string()).collect();
            format!("uuid {} {}", lengths.join("-"), case_name(*case))
        }
        FormatDescriptor::Hex { length, case } => format!("hex {} {}", length, case_name(*case)),
        FormatDescriptor::Unknown => "unknown".to_string(),
    }
}

fn case_name(case: LetterCase) -> &'static str {
    match case {
        LetterCase::Lower => "lower",
        LetterCase::Upper => "upper",
    }
}

/// Table of old and new values per field
pub fn comparison_table(old: &TelemetryIds, new: &TelemetryIds) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Field"), Cell::new("Old"), Cell::new("New")]);

    for (field, old_value) in old.iter() {
        table.add_row(vec![
            Cell::new(field.label()),
            Cell::new(old_value),
            Cell::new(new.get(field)),
        ]);
    }

    table
}

pub fn describe_terminate(outcome: TerminateOutcome) -> &'static str {
    match outcome {
        TerminateOutcome::Terminated => "Cursor closed",
        TerminateOutcome::AlreadyGone => "Cursor had already exited",
        TerminateOutcome::AccessDenied => "not permitted to close Cursor",
        TerminateOutcome::TimedOut => "Cursor did not exit within the timeout",
    }
}

pub fn describe_relaunch(outcome: &RelaunchOutcome) -> String {
    match outcome {
        RelaunchOutcome::Started { pid } => format!("Cursor restarted (pid {})", pid),
        RelaunchOutcome::ManualRestartRequired => {
            "Cursor executable not found, please start Cursor manually".to_string()
        }
        RelaunchOutcome::SpawnFailed(reason) => format!(
            "Failed to start Cursor ({}), please start it manually",
            reason
        ),
    }
}
