//! Plain-text rendering of reports and harness results.

use triage_contracts::{
    profile::Locale,
    recommendation::{CareAction, FollowupUrgency},
    report::{EmergencyVerdict, TriageReport},
};
use triage_rules::diagnostics::group_by_category;
use triage_simulator::{ScenarioResult, SimulationSummary};

const RULE: &str = "==================================================";

fn bullets(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("  {heading}"));
    lines.extend(items.iter().map(|i| format!("    - {i}")));
}

fn actions(lines: &mut Vec<String>, heading: &str, items: &[CareAction]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("  {heading}"));
    lines.extend(items.iter().map(|a| format!("    - {}: {}", a.label, a.detail)));
}

/// The message shown when the gate fires and the patient has not continued.
pub fn render_escalation(reasons: &[String]) -> String {
    let mut lines = vec![
        "EMERGENCY: seek immediate medical care (call 108).".to_string(),
        String::new(),
    ];
    lines.extend(reasons.iter().map(|r| format!("  ! {r}")));
    lines.push(String::new());
    lines.push("Re-run with --continue-anyway to see the full analysis.".to_string());
    lines.join("\n")
}

pub fn render_report(report: &TriageReport) -> String {
    let summary = &report.summary;
    let risk = &report.risk;
    let mut lines = vec![
        RULE.to_string(),
        format!("TRIAGE REPORT {}", report.consultation_id.0),
        format!("Generated {}", report.generated_at.format("%Y-%m-%d %H:%M UTC")),
        RULE.to_string(),
    ];

    let age = match (summary.age, summary.age_group) {
        (Some(a), Some(group)) => format!("{a}y ({})", group.as_str()),
        (Some(a), None) => format!("{a}y"),
        _ => "unknown".to_string(),
    };
    let pain = match (summary.pain_level, summary.severity) {
        (Some(p), Some(s)) => format!("{p}/10 ({})", s.as_str()),
        (Some(p), None) => format!("{p}/10"),
        _ => "not given".to_string(),
    };
    lines.push(format!(
        "Patient: {} | Age: {} | Conditions: {} | Pain: {}",
        summary.patient_label, age, summary.condition_count, pain
    ));

    if let EmergencyVerdict::Escalate { reasons } = &report.emergency {
        lines.push(String::new());
        lines.push("Emergency warning acknowledged:".to_string());
        lines.extend(reasons.iter().map(|r| format!("  ! {r}")));
    }

    // ── Risk ─────────────────────────────────────────────────────────────────
    lines.push(String::new());
    lines.push(format!(
        "Risk: {} (score {}, confidence {}%){}",
        risk.band,
        risk.score,
        risk.confidence,
        if risk.override_applied { " [override]" } else { "" }
    ));
    lines.push(format!("  {}", risk.message));
    let factors: Vec<String> = risk.rationales().map(str::to_string).collect();
    bullets(&mut lines, "Factors:", &factors);
    lines.push(format!("  {}", report.age_considerations));

    // ── Conditions ───────────────────────────────────────────────────────────
    lines.push(String::new());
    lines.push("Possible conditions:".to_string());
    for (i, c) in report.conditions.candidates.iter().enumerate() {
        lines.push(format!("  {}. {} ({}%) - {}", i + 1, c.name, c.probability, c.description));
        lines.push(format!("     Key factors: {}", c.factors.join(", ")));
        lines.push(format!("     Recommendation: {}", c.recommendation));
    }

    // ── Tests ────────────────────────────────────────────────────────────────
    lines.push(String::new());
    lines.push("Recommended tests:".to_string());
    for group in group_by_category(&report.tests) {
        lines.push(format!("  [{}]", group.category));
        for t in &group.tests {
            lines.push(format!(
                "    - {} ({}, {}): {}",
                t.name,
                t.urgency.as_str(),
                t.cost,
                t.purpose
            ));
        }
    }

    // ── Treatment ────────────────────────────────────────────────────────────
    lines.push(String::new());
    lines.push("Treatment plan:".to_string());
    actions(&mut lines, "Immediate actions:", &report.treatment.immediate_actions);
    actions(&mut lines, "Lifestyle:", &report.treatment.lifestyle);
    bullets(&mut lines, "Seek immediate care if:", &report.treatment.red_flags);

    // ── Referrals ────────────────────────────────────────────────────────────
    lines.push(String::new());
    lines.push("Specialist referrals:".to_string());
    for s in &report.specialists {
        let name = match report.locale {
            Locale::Hi => format!("{} ({})", s.localized_specialty, s.specialty),
            Locale::En => s.specialty.clone(),
        };
        lines.push(format!("  - {name}: {}", s.urgency));
        lines.push(format!("    {}", s.reason));
        lines.push(format!("    Services: {}", s.services));
    }

    // ── Follow-up ────────────────────────────────────────────────────────────
    let followup = &report.followup;
    lines.push(String::new());
    let urgency = match followup.urgency {
        FollowupUrgency::Urgent => "urgent",
        FollowupUrgency::Prompt => "prompt",
        FollowupUrgency::Routine => "routine",
    };
    lines.push(format!("Follow-up ({urgency}):"));
    for entry in &followup.timeline {
        lines.push(format!("    {}: {}", entry.when, entry.action));
    }
    actions(&mut lines, "Monitoring:", &followup.monitoring);
    bullets(&mut lines, "Call 108 immediately if:", &followup.emergency_criteria);
    actions(&mut lines, "Self-care:", &followup.self_care);

    lines.push(String::new());
    lines.push(format!("Digest: {}", report.digest));
    lines.push(
        "This analysis is informational and does not replace a medical consultation.".to_string(),
    );
    lines.join("\n")
}

pub fn render_simulation(summary: &SimulationSummary) -> String {
    let mut lines = vec![format!("Simulated {} profiles", summary.runs)];
    for (band, count) in summary.band_counts.iter().rev() {
        lines.push(format!("  {:<11} {count}", band.as_str()));
    }
    if summary.anomalies.is_empty() {
        lines.push("No anomalies.".to_string());
    } else {
        lines.push(format!("Anomalies ({}):", summary.anomalies.len()));
        for a in &summary.anomalies {
            let age = a.age.map_or("?".to_string(), |v| v.to_string());
            lines.push(format!(
                "  - age {age}, conditions [{}] scored {}",
                a.conditions.join(", "),
                a.band
            ));
        }
    }
    lines.join("\n")
}

pub fn render_scenarios(results: &[ScenarioResult]) -> String {
    let mut lines = Vec::new();
    for r in results {
        let status = if r.passed() { "PASS" } else { "FAIL" };
        let risk = match (r.band, r.score, r.confidence) {
            (Some(band), Some(score), Some(confidence)) => {
                format!("{band} score {score} ({confidence}%)")
            }
            _ => "not scored".to_string(),
        };
        lines.push(format!(
            "[{status}] {}: {} | gate {} | {risk}",
            r.id,
            r.title,
            if r.gate_fired { "fired" } else { "clear" },
        ));
        lines.extend(r.mismatches.iter().map(|m| format!("       {m}")));
    }
    lines.join("\n")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
