//! End-to-end pipeline tests with a mock provider

use carbontrace_analyzer::{AnalysisResponse, AnalyzeError, Analyzer, ANALYSIS_FAILED_MESSAGE};
use carbontrace_domain::{ActivityCategory, Unit};
use carbontrace_emissions::FactorTable;
use carbontrace_extractor::{Extractor, ExtractorConfig};
use carbontrace_llm::MockProvider;
use std::time::Duration;

const PETROL_CAR_KM: &str = r#"{"category": "transportation", "activityName": "Drive to work", "itemName": "petrol car", "quantity": 15, "unit": "km", "reasoning": "Drove a petrol car for 15 km."}"#;
const PETROL_CAR_MILES: &str = r#"{"category": "transportation", "activityName": "Drive to the coast", "itemName": "petrol car", "quantity": 15, "unit": "mile"}"#;
const CHICKEN: &str = r#"{"category": "food_consumption", "activityName": "Lunch with Fried Chicken", "itemName": "chicken", "quantity": 200, "unit": "g"}"#;
const JEANS: &str = r#"{"category": "shopping_lifestyle", "activityName": "Bought new jeans", "itemName": "jeans", "quantity": 1, "unit": "serving"}"#;
const UNOBTAINIUM: &str = r#"{"category": "other", "activityName": "Mined something", "itemName": "unobtainium", "quantity": 5, "unit": "kg"}"#;

fn mock() -> MockProvider {
    let mut provider = MockProvider::new("not json at all");
    provider.add_response("to the office", PETROL_CAR_KM);
    provider.add_response("to the coast", PETROL_CAR_MILES);
    provider.add_response("roast chicken", CHICKEN);
    provider.add_response("at the mall", JEANS);
    provider.add_response("unobtainium", UNOBTAINIUM);
    provider.add_error("provider is down");
    provider
}

fn analyzer(provider: MockProvider) -> Analyzer<Extractor<MockProvider>> {
    Analyzer::from_provider(provider, ExtractorConfig::default(), FactorTable::builtin()).unwrap()
}

#[tokio::test]
async fn test_petrol_car_km() {
    let response = analyzer(mock())
        .analyze("I drove 15km to the office in my petrol car")
        .await;

    assert!(response.success);
    let data = response.data.unwrap();
    assert_eq!(data.activity.category, ActivityCategory::Transportation);
    assert_eq!(data.activity.item_name, "petrol car");
    assert_eq!(data.activity.unit, Unit::Km);
    assert_eq!(data.co2e, 2.88);
}

#[tokio::test]
async fn test_petrol_car_miles() {
    let response = analyzer(mock())
        .analyze("Drove 15 miles to the coast in my petrol car")
        .await;
    assert_eq!(response.data.unwrap().co2e, 4.635);
}

#[tokio::test]
async fn test_grams_of_chicken() {
    let response = analyzer(mock())
        .analyze("Had 200g of roast chicken for dinner")
        .await;
    assert_eq!(response.data.unwrap().co2e, 1.38);
}

#[tokio::test]
async fn test_single_item() {
    let response = analyzer(mock())
        .analyze("Picked up some jeans at the mall")
        .await;
    let data = response.data.unwrap();
    assert_eq!(data.activity.quantity, 1.0);
    assert_eq!(data.activity.unit, Unit::Serving);
    assert_eq!(data.co2e, 33.4);
}

#[tokio::test]
async fn test_unknown_item_is_success_with_zero() {
    let response = analyzer(mock())
        .analyze("I mined 5kg of unobtainium")
        .await;
    assert!(response.success);
    assert_eq!(response.data.unwrap().co2e, 0.0);
}

#[tokio::test]
async fn test_huge_quantity_keeps_co2e_finite() {
    let provider = MockProvider::new(
        r#"{"category": "food_consumption", "activityName": "Feast", "itemName": "beef", "quantity": 1e307, "unit": "kg"}"#,
    );
    let analyzer =
        Analyzer::from_provider(provider, ExtractorConfig::default(), FactorTable::builtin()).unwrap();

    let response = analyzer.analyze("An unreasonably large feast").await;
    assert!(response.success);
    let data = response.clone().data.unwrap();
    assert!(data.co2e.is_finite());
    assert_eq!(data.co2e, 0.0);

    let json = serde_json::to_value(&response).unwrap();
    assert!(json["data"]["co2e"].is_number());
}

#[tokio::test]
async fn test_provider_failure() {
    let response = analyzer(mock())
        .analyze("the provider is down today")
        .await;
    assert!(!response.success);
    assert!(response.data.is_none());
    assert_eq!(response.error.as_deref(), Some(ANALYSIS_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_invalid_completion() {
    let response = analyzer(mock()).analyze("something unmatched").await;
    assert!(!response.success);
    assert!(!response.error.unwrap().is_empty());
}

#[tokio::test]
async fn test_timeout_is_generic_failure() {
    let provider = MockProvider::new(JEANS).with_delay(Duration::from_secs(2));
    let mut config = ExtractorConfig::default();
    config.extraction_timeout_secs = 1;
    let analyzer =
        Analyzer::from_provider(provider, config, FactorTable::builtin()).unwrap();

    let response = analyzer.analyze("I bought a new pair of jeans").await;
    assert_eq!(response.error.as_deref(), Some(ANALYSIS_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_empty_input_reports_its_own_message() {
    let provider = mock();
    let probe = provider.clone();
    let analyzer = analyzer(provider);

    let response = analyzer.analyze("   ").await;
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Activity description is empty"));
    assert_eq!(probe.call_count(), 0);

    let result = analyzer.try_analyze("").await;
    assert!(matches!(result, Err(AnalyzeError::InvalidInput(_))));
}

#[tokio::test]
async fn test_known_items_reach_the_prompt() {
    let provider = mock();
    let probe = provider.clone();
    analyzer(provider)
        .analyze("I drove 15km to the office in my petrol car")
        .await;

    let prompt = probe.last_prompt().unwrap();
    assert!(prompt.contains("petrol car"));
    assert!(prompt.contains("long-haul flight"));
}

#[tokio::test]
async fn test_repeated_analysis_is_stable() {
    let analyzer = analyzer(mock());
    let first = analyzer.analyze("I drove 15km to the office in my petrol car").await;
    let second = analyzer.analyze("I drove 15km to the office in my petrol car").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_envelope_json() {
    let response = analyzer(mock())
        .analyze("I drove 15km to the office in my petrol car")
        .await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["co2e"], 2.88);
    assert_eq!(json["data"]["category"], "transportation");

    let parsed: AnalysisResponse = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, response);
}

#[tokio::test]
async fn test_custom_factor_table_with_alias() {
    let table = FactorTable::from_toml(
        r#"
        [[factors]]
        id = "chicken"
        name = "chicken"
        value = 6.9
        unit = "kg"
        description = "Poultry Meat"

        [aliases]
        "fried chicken" = "chicken"
        "#,
    )
    .unwrap();

    let provider = MockProvider::new(
        r#"{"category": "food_consumption", "activityName": "Lunch", "itemName": "fried chicken", "quantity": 0.5, "unit": "kg"}"#,
    );
    let analyzer =
        Analyzer::from_provider(provider, ExtractorConfig::default(), table.into()).unwrap();

    let response = analyzer.analyze("Half a kilo of fried chicken").await;
    assert_eq!(response.data.unwrap().co2e, 3.45);
}
