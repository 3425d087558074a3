//! Terminal rendering for service payloads.
//!
//! Every command supports `--json` for the raw payload; the functions here
//! cover the default human-readable view.

use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::ProgressBar;
use serde::Serialize;

use crate::api::payload::{
    AgendaPayload, FramePayload, ImpassePayload, KnowledgeResource, OntoLangResult,
    ReportPayload, SignalAnchor, SignalPayload,
};

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_frame(frame: &FramePayload) {
    println!("{}", style(&frame.id).bold());
    if frame.fillers.is_empty() {
        println!("  {}", style("(no fillers)").dim());
        return;
    }
    for filler in &frame.fillers {
        println!(
            "  {} {} {} {}",
            style(&filler.slot).cyan(),
            style(&filler.facet).dim(),
            filler.filler,
            style(&filler.kind).dim(),
        );
    }
}

pub fn print_signals(signals: &[SignalAnchor]) {
    if signals.is_empty() {
        println!("{}", style("No signals").dim());
        return;
    }
    for anchor in signals {
        println!(
            "{} {} root {} ({} reports)",
            paint_status(anchor.status.as_str()),
            style(&anchor.anchor).bold(),
            anchor.root,
            anchor.reports.len(),
        );
    }
}

pub fn print_signal(signal: &SignalPayload) {
    println!(
        "{} {} root {}",
        paint_status(signal.anchor.status.as_str()),
        style(&signal.anchor.anchor).bold(),
        signal.anchor.root,
    );
    for frame in &signal.contents {
        print_frame(frame);
    }
}

pub fn print_impasse(impasse: &ImpassePayload) {
    println!(
        "{} detected by {}.{}",
        style(&impasse.anchor).bold(),
        impasse.detect_module,
        impasse.detect_class,
    );
    for resolution in &impasse.resolutions {
        println!(
            "  resolution {} for goal {}",
            resolution.anchor,
            style(&resolution.goal).cyan(),
        );
    }
}

pub fn print_report(report: &ReportPayload) {
    let validation = if report.validation {
        style("✓").green()
    } else {
        style("✗").red()
    };
    println!(
        "{} {} {} {}.{}",
        paint_status(report.status.as_str()),
        validation,
        style(&report.anchor).bold(),
        report.executable_module,
        report.executable_class,
    );
    print_frame(&report.contents);
}

pub fn print_agenda(agenda: &AgendaPayload) {
    if agenda.goals.is_empty() && agenda.options.is_empty() {
        println!("{}", style("Agenda is empty").dim());
        return;
    }

    for goal in &agenda.goals {
        println!(
            "{} {} priority {:.2}",
            paint_status(goal.status.as_str()),
            style(&goal.anchor).bold(),
            goal.priority,
        );
        for plan in &goal.plans {
            println!(
                "  {} {} cost {:.2}",
                paint_status(plan.status.as_str()),
                plan.anchor,
                plan.cost,
            );
            for step in &plan.steps {
                let mut line = format!(
                    "    {} {}",
                    paint_status(step.status.as_str()),
                    step.anchor,
                );
                if let Some(effector) = &step.effector {
                    line.push_str(&format!(" effector {}", effector));
                }
                if !step.impasses.is_empty() {
                    line.push_str(&format!(" impasses {}", step.impasses.join(", ")));
                }
                println!("{}", line);
            }
        }
    }

    for option in &agenda.options {
        let marker = if option.selected {
            style("*").green().bold().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} {} {} score {:.2} ({} / {} / {})",
            marker,
            paint_status(option.status.as_str()),
            option.anchor,
            option.score,
            option.goal,
            option.plan,
            option.step,
        );
    }
}

pub fn print_resources(resources: &[KnowledgeResource]) {
    for resource in resources {
        let mark = if resource.loaded {
            style("✓").green()
        } else {
            style("✗").red()
        };
        println!("{} {}/{}", mark, resource.package, resource.file);
    }
}

pub fn print_ontolang_result(result: &OntoLangResult) {
    let mark = if result.success {
        style("✓").green()
    } else {
        style("✗").red()
    };
    println!("{} {}", mark, result.message);
    for frame in &result.frames {
        print_frame(frame);
    }
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn paint_status(name: &'static str) -> String {
    let styled = match name {
        "ACTIVE" | "EXECUTING" | "CURRENT" | "RECEIVED" => style(name).green(),
        "SATISFIED" | "FINISHED" | "CONSUMED" => style(name).cyan(),
        "ABANDONED" | "FAILED" | "IMPASSED" | "EXPIRED" => style(name).red(),
        _ => style(name).yellow(),
    };
    styled.to_string()
}
