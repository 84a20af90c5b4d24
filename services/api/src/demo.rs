use crate::infra::{parse_poll_ms, parse_ruleset};
use clap::Args;
use docuverify::config::PortalConfig;
use docuverify::error::AppError;
use docuverify::portal::{
    ConsentField, ConsentRequest, NavigationRequest, PortalService, PortalServiceError,
    RulesetVersion, SectionChecklist, SessionId, Transition, ValidationRuleset, ROLE_OPTIONS,
};
use serde_json::{json, Value};
use std::time::Duration;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Ruleset to validate against (current or legacy). Defaults to current.
    #[arg(long, value_parser = parse_ruleset)]
    pub(crate) ruleset: Option<RulesetVersion>,
    /// Payment container poll interval in milliseconds.
    #[arg(long, value_parser = parse_poll_ms)]
    pub(crate) poll_ms: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct StepsArgs {
    /// Ruleset to describe (current or legacy). Defaults to current.
    #[arg(long, value_parser = parse_ruleset)]
    pub(crate) ruleset: Option<RulesetVersion>,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let mut config = PortalConfig::default();
    if let Some(ruleset) = args.ruleset {
        config.ruleset = ruleset;
    }
    if let Some(poll_ms) = args.poll_ms {
        config.payment.poll_interval = Duration::from_millis(poll_ms);
    }
    let poll_interval = config.payment.poll_interval;

    let service = PortalService::new(config);
    let session = service.create();
    let id = session.session_id;
    let final_step = session.steps.len() as u8;

    println!("DocuVerify portal demo");
    println!(
        "Session {id} using the {} ruleset ({final_step} steps)",
        session.ruleset.label()
    );

    let mut sections = demo_sections().into_iter();
    if let Some((key, payload)) = sections.next() {
        let view = service.update_section(&id, key, payload)?;
        println!("\nSaved {key}");
        render_checklist(&view.checklist);
    }

    let attempt = service.navigate(&id, NavigationRequest::GoTo { step: final_step })?;
    println!("\nJump to review: {}", describe(&attempt.transition));

    for (key, payload) in sections {
        service.update_section(&id, key, payload)?;
        println!("Saved {key}");
    }

    let attempt = service.navigate(&id, NavigationRequest::GoTo { step: final_step })?;
    println!("\nJump to review: {}", describe(&attempt.transition));
    render_checklist(&attempt.session.checklist);

    let review = service.review(&id)?;
    println!("\nReview summary");
    for line in &review.personal {
        println!("  {:<18} {}", line.label, line.value);
    }
    for document in &review.documents {
        let status = document.file_name.as_deref().unwrap_or("missing");
        println!("  {:<18} {}", document.label, status);
    }
    if let Some(job) = &review.job {
        println!("  {:<18} {}", "Primary role", job.primary_role);
    }

    match service.finalize(&id) {
        Err(PortalServiceError::ConsentIncomplete) => {
            println!("\nFinalize refused until the declarations are accepted");
        }
        other => {
            other?;
        }
    }

    for field in ValidationRuleset::for_version(session.ruleset).consent_fields {
        service.set_consent(&id, ConsentRequest { field, value: true })?;
        println!("Accepted: {}", field.statement());
    }
    let view = service.finalize(&id)?;
    println!("\nPayment modal visible: {}", view.payment_modal_visible);

    tokio::time::sleep(poll_interval * 2).await;
    let waiting = service.payment(&id)?;
    println!(
        "Container mounted: {}, still polling: {}",
        waiting.container_mounted, waiting.polling
    );

    service.mount_payment_container(&id)?;
    let payment = wait_for_widget(&service, &id, poll_interval).await?;
    println!("Payment widget scripts: {}", payment.script_count);
    if let Some(markup) = &payment.markup {
        println!("{markup}");
    }

    let closed = service.close_payment(&id)?;
    println!(
        "\nModal closed; scripts remaining: {}",
        closed.script_count
    );
    service.discard(&id)?;

    Ok(())
}

pub(crate) fn run_steps(args: StepsArgs) {
    let ruleset = ValidationRuleset::for_version(args.ruleset.unwrap_or(RulesetVersion::Current));

    println!("Ruleset: {}", ruleset.version.label());
    for step in ruleset.steps().iter() {
        let gate = if step.ordinal == ruleset.steps().final_step() {
            " (requires a complete record)"
        } else {
            ""
        };
        println!("  {}. {}{gate}", step.ordinal, step.title);
    }

    println!("\nRules");
    println!("  Email required:        {}", yes_no(ruleset.require_email));
    println!("  Documents required:    {}", yes_no(ruleset.require_documents));
    println!("  Job section required:  {}", yes_no(ruleset.require_job_section));
    match ruleset.justification_char_limit {
        Some(limit) => println!("  Justification limit:   {limit} characters"),
        None => println!("  Justification limit:   none"),
    }
    for field in &ruleset.consent_fields {
        println!("  Consent:               {}", field.statement());
    }
}

async fn wait_for_widget(
    service: &PortalService,
    id: &SessionId,
    poll_interval: Duration,
) -> Result<docuverify::portal::PaymentView, AppError> {
    for _ in 0..10 {
        tokio::time::sleep(poll_interval).await;
        let payment = service.payment(id)?;
        if payment.script_count > 0 {
            return Ok(payment);
        }
    }
    Ok(service.payment(id)?)
}

fn demo_sections() -> Vec<(&'static str, Value)> {
    vec![
        (
            "personalDetails",
            json!({
                "fullName": "Asha Verma",
                "fatherName": "Raghav Verma",
                "emailAddress": "asha.verma@example.com",
                "dateOfBirth": "1999-04-12",
                "contactNumber": "+91 98450 12345",
                "permanentAddress": "14 Lake Road, Pune"
            }),
        ),
        (
            "academicHistory",
            json!({
                "tenth": { "board": "CBSE", "year": "2015", "percentage": "91" },
                "twelfth": { "board": "CBSE", "year": "2017", "percentage": "88" },
                "bachelor": {
                    "board": "Pune University",
                    "year": "2021",
                    "percentage": "8.4",
                    "degree": "B.E. Computer Engineering"
                },
                "courses": [{ "name": "Cloud Fundamentals", "grade": "A" }]
            }),
        ),
        (
            "documents",
            json!({
                "passport": { "name": "passport.jpg" },
                "tenth": { "name": "tenth-marksheet.pdf" },
                "twelfth": { "name": "twelfth-marksheet.pdf" },
                "degree": { "name": "degree-marksheet.pdf" }
            }),
        ),
        (
            "jobSection",
            json!({
                "interestedRole": ROLE_OPTIONS[1],
                "selectedRoles": [ROLE_OPTIONS[3]],
                "whyBestFit": "Three years of shipping Node services backed by Postgres."
            }),
        ),
    ]
}

fn describe(transition: &Transition) -> String {
    match transition {
        Transition::Moved { from, to } => format!("moved from step {from} to step {to}"),
        Transition::Stayed { step } => format!("stayed on step {step}"),
        Transition::Blocked { step, reason } => format!("blocked on step {step} ({reason:?})"),
    }
}

fn render_checklist(checklist: &SectionChecklist) {
    println!(
        "  personal: {}, academic: {}, documents: {}, job: {}",
        yes_no(checklist.personal),
        yes_no(checklist.academic),
        yes_no(checklist.documents),
        yes_no(checklist.job)
    );
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn demo_runs_for_both_rulesets() {
        for ruleset in [RulesetVersion::Current, RulesetVersion::Legacy] {
            run_demo(DemoArgs {
                ruleset: Some(ruleset),
                poll_ms: Some(10),
            })
            .await
            .expect("demo completes");
        }
    }

    #[test]
    fn describe_reports_blocked_jumps() {
        let text = describe(&Transition::Stayed { step: 2 });
        assert_eq!(text, "stayed on step 2");
    }
}
