use crate::infra::answers_in_bank_order;
use chrono::Local;
use clap::{Args, ValueEnum};
use readiness_quiz::config::AppConfig;
use readiness_quiz::error::AppError;
use readiness_quiz::workflows::scorecard::{
    Category, Question, QuizSession, ResultsReport, ScorecardService, UserInfo,
};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Scores in question order, comma separated (e.g. 4,3,3,1,...)
    #[arg(long, value_delimiter = ',', num_args = 1.., required = true)]
    pub(crate) answers: Vec<i32>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Answer pattern used for every question
    #[arg(long, value_enum, default_value_t = DemoProfile::Mixed)]
    pub(crate) profile: DemoProfile,
    /// Name submitted on the lead form
    #[arg(long, default_value = "Dana Levi")]
    pub(crate) name: String,
    /// E-mail submitted on the lead form
    #[arg(long, default_value = "dana@kai.example")]
    pub(crate) email: String,
    /// Company submitted on the lead form
    #[arg(long, default_value = "Kai Labs")]
    pub(crate) company: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum DemoProfile {
    /// Lowest option everywhere
    Minimum,
    /// Highest option everywhere
    Maximum,
    /// Strong execution and data, weak adoption
    Mixed,
}

impl DemoProfile {
    fn pick(self, question: &Question) -> i32 {
        let low = question.min_score().unwrap_or_default();
        let high = question.max_score().unwrap_or_default();
        match self {
            Self::Minimum => low,
            Self::Maximum => high,
            Self::Mixed => match question.category {
                Category::Execution => high,
                Category::Adoption => low,
                Category::Data => high - 1,
                Category::Mindset => low + 1,
            },
        }
    }
}

fn load_service() -> Result<ScorecardService, AppError> {
    let config = AppConfig::load()?;
    Ok(ScorecardService::from_config(&config.scorecard)?)
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let service = load_service()?;
    let answers = answers_in_bank_order(service.bank(), &args.answers)?;
    let report = service.score(&answers)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{json}");
    } else {
        println!(
            "Answered {} of {} questions",
            answers.len(),
            service.bank().len()
        );
        render_report(&report);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        profile,
        name,
        email,
        company,
    } = args;

    let service = load_service()?;
    let bank = service.bank();
    let mut session = QuizSession::new();

    println!(
        "AI readiness scorecard demo ({:?} profile, {})",
        profile,
        Local::now().format("%Y-%m-%d %H:%M")
    );
    println!("Step: {}", session.step().label());

    session.start()?;
    println!("Step: {}", session.step().label());

    let mut revisited = false;
    while let Some(question) = session.current_question(bank) {
        let progress = session.progress(bank);
        let score = profile.pick(question);
        let label = question
            .option_for_score(score)
            .map(|option| option.label.as_str())
            .unwrap_or("-");
        println!(
            "  [{:>2}/{} {:>3.0}%] {} -> {} ({})",
            progress.number,
            progress.total,
            progress.percent,
            question.text,
            score,
            label
        );
        session.answer(bank, score)?;

        if !revisited && session.question_index() == 2 {
            revisited = true;
            session.back()?;
            println!("  Back to question {}", session.question_index() + 1);
        }
    }

    println!("Step: {}", session.step().label());
    let lead = UserInfo::new(name, email, company);
    session.begin_submission(bank, &lead)?;
    println!("  Submitting lead for {} ({})...", lead.name, lead.company);
    session.finish_submission()?;
    println!("Step: {}", session.step().label());

    let screen = service.screen(&session);
    match screen.report {
        Some(report) => render_report(&report),
        None => println!("No results available"),
    }

    Ok(())
}

pub(crate) fn render_report(report: &ResultsReport) {
    println!();
    println!(
        "AI effectiveness score: {}% ({}) | raw {}",
        report.final_percent, report.band_label, report.raw_score
    );
    match report.benchmark_gap {
        Some(gap) => println!(
            "Benchmark {}%: {} points to close",
            report.benchmark_percent, gap
        ),
        None => println!("Benchmark {}%: met", report.benchmark_percent),
    }
    println!("{}", report.headline);

    println!("\nCategory breakdown");
    for card in &report.categories {
        println!(
            "- {}: {:.2} [{}]",
            card.label, card.average, card.classification_label
        );
    }

    let engines: Vec<_> = report.engines().collect();
    if !engines.is_empty() {
        println!("\nGrowth engines");
        for card in engines {
            println!("- {}: {}", card.label, card.text);
        }
    }

    let barriers: Vec<_> = report.barriers().collect();
    if !barriers.is_empty() {
        println!("\nBarriers");
        for card in barriers {
            println!("- {}: {}", card.label, card.text);
        }
    }

    println!("\nBook an intro meeting: {}", report.contact.mailto());
}
