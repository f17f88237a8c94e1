use crate::infra::InMemoryCooperativeRepository;
use clap::Args;
use sourcing_intel::config::AppConfig;
use sourcing_intel::error::AppError;
use sourcing_intel::regions::{peru_regions, RegionIntelligence};
use sourcing_intel::sourcing::{
    CommunicationMetrics, Cooperative, CooperativeId, CooperativeRepository, DigitalFootprint,
    ExportReadinessData, FinancialData, OperationalData, SourcingAnalysis, SourcingAnalyzer,
    SourcingDataset, SourcingServiceError, StaticPriceFeed,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// JSON dataset with `cooperatives` and optional `regions` arrays
    #[arg(long)]
    pub(crate) dataset: PathBuf,
    /// Only analyze this cooperative
    #[arg(long)]
    pub(crate) cooperative_id: Option<u64>,
    /// Print the full analyses as JSON instead of a report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the region intelligence table.
    #[arg(long)]
    pub(crate) skip_regions: bool,
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        dataset,
        cooperative_id,
        json,
    } = args;

    let config = AppConfig::load()?;
    let dataset = SourcingDataset::from_path(&dataset)?;
    let repository = Arc::new(InMemoryCooperativeRepository::from_dataset(dataset));
    let analyzer = SourcingAnalyzer::new(
        repository.clone(),
        Arc::new(StaticPriceFeed),
        config.sourcing.clone(),
    );

    let ids = match cooperative_id {
        Some(id) => vec![CooperativeId(id)],
        None => repository
            .list_ids()
            .map_err(SourcingServiceError::from)?,
    };

    let analyses = ids
        .into_iter()
        .map(|id| analyzer.analyze(id))
        .collect::<Result<Vec<_>, _>>()?;

    if json {
        let rendered = serde_json::to_string_pretty(&analyses).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        println!(
            "Sourcing analysis ({} cooperatives, fallback FOB ${:.2}/kg)",
            analyses.len(),
            config.sourcing.fallback_fob_usd_per_kg
        );
        for analysis in &analyses {
            render_analysis(analysis);
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryCooperativeRepository::seeded(
        sample_cooperatives(),
        peru_regions(),
    ));
    let analyzer = SourcingAnalyzer::new(
        repository,
        Arc::new(StaticPriceFeed),
        Default::default(),
    );

    println!("Sourcing intelligence demo");
    let summary = analyzer.analyze_all()?;
    println!(
        "Batch run: {} analyzed, {} failed",
        summary.analyzed,
        summary.failed.len()
    );

    for cooperative in sample_cooperatives() {
        let analysis = analyzer.analyze(cooperative.id)?;
        render_analysis(&analysis);
        let runs = analyzer.history(cooperative.id)?.len();
        println!("  history: {runs} stored runs");
    }

    if !args.skip_regions {
        println!("\nPeru growing regions");
        for region in peru_regions() {
            render_region(&RegionIntelligence::from_region(&region));
        }
    }

    Ok(())
}

fn render_analysis(analysis: &SourcingAnalysis) {
    println!(
        "\n#{} {} | total {:.1} | risk {:.0} | {}",
        analysis.cooperative_id,
        analysis.cooperative_name,
        analysis.total_score,
        analysis.risk_assessment.risk_score,
        analysis.recommendation
    );
    println!(
        "  supply {:.0} | quality {:.0} | export {:.0} | price {:.1} | communication {:.0}",
        analysis.supply_capacity.score,
        analysis.quality_track_record_score,
        analysis.export_readiness.score,
        analysis.price_benchmark.score,
        analysis.communication_score
    );

    let benchmark = &analysis.price_benchmark;
    match (benchmark.cooperative_price, benchmark.regional_benchmark) {
        (Some(price), Some(reference)) => println!(
            "  price ${price:.2}/kg vs ${reference:.2}/kg ({:+.1}%)",
            benchmark.difference_pct.unwrap_or_default()
        ),
        (None, Some(reference)) => {
            println!("  no achieved price on record; benchmark ${reference:.2}/kg")
        }
        _ => println!("  no price benchmark available"),
    }

    for factor in &analysis.risk_assessment.risk_factors {
        println!("  risk: {factor}");
    }
}

fn render_region(region: &RegionIntelligence) {
    println!(
        "- {}: growing conditions {:.0}/100 | FOB {} | harvest {}",
        region.name,
        region.growing_conditions_score,
        region
            .avg_fob_price
            .map(|price| format!("${price:.2}/kg"))
            .unwrap_or_else(|| "n/a".to_string()),
        region.harvest_season.as_deref().unwrap_or("n/a")
    );
}

fn sample_cooperatives() -> Vec<Cooperative> {
    vec![
        Cooperative {
            region: Some("Cajamarca".to_string()),
            altitude_m: Some(1750.0),
            certifications: Some("Organic, Fair Trade, Rainforest Alliance".to_string()),
            website: Some("https://cenfrocafe.example".to_string()),
            quality_score: Some(87.0),
            operational_data: OperationalData {
                farmer_count: Some(2300),
                storage_capacity_kg: Some(350_000.0),
                has_wet_mill: Some(true),
                has_dry_mill: Some(true),
            },
            export_readiness: ExportReadinessData {
                export_license_number: Some("EXP-2019-0042".to_string()),
                export_license_expiry: Some("2027-06-30".to_string()),
                senasa_registered: Some(true),
                customs_clearance_issues_count: Some(0),
                has_document_coordinator: Some(true),
                export_experience_years: Some(18.0),
                containers_exported_lifetime: Some(310),
            },
            financial_data: FinancialData {
                annual_revenue_usd: Some(4_200_000.0),
                export_volume_kg_last_year: Some(620_000.0),
                avg_price_achieved_usd_per_kg: Some(5.45),
            },
            communication_metrics: CommunicationMetrics {
                avg_email_response_time_hours: Some(14.0),
                languages_spoken: vec!["Spanish".to_string(), "English".to_string()],
                whatsapp_business: Some(true),
                provides_photos_regularly: Some(true),
                provides_cupping_scores: Some(true),
                missed_meetings_count: Some(0),
            },
            digital_footprint: DigitalFootprint {
                facebook_url: Some("https://facebook.com/cenfrocafe".to_string()),
                instagram_url: None,
            },
            ..Cooperative::new(CooperativeId(1), "Cenfrocafe")
        },
        Cooperative {
            region: Some("Junín".to_string()),
            altitude_m: Some(1350.0),
            certifications: Some("Organic".to_string()),
            quality_score: Some(78.0),
            operational_data: OperationalData {
                farmer_count: Some(140),
                storage_capacity_kg: Some(40_000.0),
                has_wet_mill: Some(true),
                has_dry_mill: None,
            },
            export_readiness: ExportReadinessData {
                export_license_number: Some("EXP-2021-0310".to_string()),
                export_license_expiry: Some("2026-01-31".to_string()),
                senasa_registered: Some(true),
                customs_clearance_issues_count: Some(2),
                export_experience_years: Some(4.0),
                ..ExportReadinessData::default()
            },
            financial_data: FinancialData {
                annual_revenue_usd: Some(380_000.0),
                export_volume_kg_last_year: Some(38_000.0),
                avg_price_achieved_usd_per_kg: Some(4.70),
            },
            communication_metrics: CommunicationMetrics {
                avg_email_response_time_hours: Some(40.0),
                languages_spoken: vec!["Spanish".to_string()],
                whatsapp_business: Some(true),
                provides_photos_regularly: Some(true),
                missed_meetings_count: Some(1),
                ..CommunicationMetrics::default()
            },
            ..Cooperative::new(CooperativeId(2), "Cooperativa Alto Palomar")
        },
        Cooperative {
            region: Some("Puno".to_string()),
            altitude_m: Some(2350.0),
            ..Cooperative::new(CooperativeId(3), "Asociación Tunki Nueva")
        },
    ]
}
