use super::*;
use plansheet_core::PlanBrand;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Wraps `body` in a document padded past the blocked-page threshold. The
/// padding lives in a script so it never reaches the page text.
fn padded_page(body: &str) -> String {
    format!(
        "<html><head><script>/*{}*/</script></head><body>{body}</body></html>",
        "x".repeat(12_000)
    )
}

fn collect(text: &str) -> Vec<PlanOffer> {
    let rules = ExtractionRules::default();
    let mut collector = OfferCollector::new(&rules);
    collector.scan_all(text);
    collector.into_offers()
}

// -----------------------------------------------------------------------
// OfferCollector gates
// -----------------------------------------------------------------------

#[test]
fn two_offers_in_one_run_of_text() {
    let offers =
        collect("2 Year Extended Warranty Plan for ₹899.00 1 Year Screen Protection by Acko at ₹299");

    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0].name, "2 Year Extended Warranty Plan");
    assert_eq!(offers[0].price, Some(dec("899.00")));
    assert_eq!(offers[0].brand, PlanBrand::ZopperIndia);
    assert_eq!(offers[1].name, "1 Year Screen Protection by Acko");
    assert_eq!(offers[1].price, Some(dec("299")));
    assert_eq!(offers[1].brand, PlanBrand::Acko);
}

#[test]
fn from_connective_is_accepted() {
    let offers = collect("Onsitego 2 Year Extended Warranty from ₹ 649");
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].brand, PlanBrand::Onsitego);
    assert_eq!(offers[0].price, Some(dec("649")));
}

#[test]
fn short_description_is_rejected() {
    assert!(collect("Plan for ₹99").is_empty());
}

#[test]
fn description_without_keyword_is_rejected() {
    assert!(collect("Buy two mixer jars for ₹1,999").is_empty());
}

#[test]
fn duplicates_are_dropped_case_insensitively() {
    let offers = collect(
        "Extended Warranty Plan for ₹499\nEXTENDED WARRANTY PLAN for ₹599\nextended  warranty plan at ₹699",
    );
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].price, Some(dec("499")));
}

#[test]
fn thousands_separator_is_removed_from_price() {
    let offers = collect("3 Year Total Protection Plan for ₹1,299.00");
    assert_eq!(offers[0].price, Some(dec("1299.00")));
}

#[test]
fn internal_whitespace_in_name_is_collapsed() {
    let offers = collect("1 Year   Extended\tWarranty for ₹349");
    assert_eq!(offers[0].name, "1 Year Extended Warranty");
}

#[test]
fn stops_after_max_offers_in_discovery_order() {
    let offers = collect(
        "1 Year Extended Warranty for ₹349\n\
         2 Year Extended Warranty for ₹549\n\
         3 Year Extended Warranty for ₹749\n\
         4 Year Extended Warranty for ₹949",
    );
    let names: Vec<_> = offers.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "1 Year Extended Warranty",
            "2 Year Extended Warranty",
            "3 Year Extended Warranty"
        ]
    );
}

#[test]
fn scan_first_takes_only_the_first_match() {
    let rules = ExtractionRules::default();
    let mut collector = OfferCollector::new(&rules);
    collector.scan_first("1 Year Extended Warranty for ₹349 2 Year Extended Warranty for ₹549");
    let offers = collector.into_offers();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].name, "1 Year Extended Warranty");
}

#[test]
fn custom_rules_change_the_gates() {
    let rules = ExtractionRules {
        keywords: vec!["amc".to_owned()],
        min_name_chars: 3,
        max_offers: 1,
        ..ExtractionRules::default()
    };
    let mut collector = OfferCollector::new(&rules);
    collector.scan_all("Extended Warranty for ₹349\nAMC for ₹99\nAMC Gold for ₹199");
    let offers = collector.into_offers();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].name, "AMC");
}

// -----------------------------------------------------------------------
// extract_offers: section pass then page pass
// -----------------------------------------------------------------------

#[test]
fn section_offers_come_before_page_offers() {
    let html = padded_page(
        r#"<p>Servify Screen Damage Protection for ₹1,099</p>
        <div class="a-section">
          <h3>Add a Protection Plan:</h3>
          <label><span>1 Year Extended Warranty for ₹399.00</span></label>
          <label><span>Total Protection Plan by Acko for ₹899</span></label>
        </div>"#,
    );
    let offers = extract_offers_from_html(&html, &ExtractionRules::default());

    let names: Vec<_> = offers.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "1 Year Extended Warranty",
            "Total Protection Plan by Acko",
            "Servify Screen Damage Protection"
        ]
    );
    assert_eq!(offers[1].brand, PlanBrand::Acko);
    assert_eq!(offers[2].brand, PlanBrand::Servify);
}

#[test]
fn full_section_skips_page_pass() {
    let html = padded_page(
        r#"<p>Servify Screen Damage Protection for ₹1,099</p>
        <section>
          <h4>Add a Protection Plan</h4>
          <label>1 Year Extended Warranty for ₹399</label>
          <label>2 Year Extended Warranty for ₹599</label>
          <label>3 Year Extended Warranty for ₹799</label>
        </section>"#,
    );
    let offers = extract_offers_from_html(&html, &ExtractionRules::default());
    assert_eq!(offers.len(), 3);
    assert!(offers.iter().all(|o| o.brand == PlanBrand::ZopperIndia));
}

#[test]
fn section_found_by_container_id() {
    let html = padded_page(
        r#"<p>Servify Screen Damage Protection for ₹1,099</p>
        <div id="mbbWarrantyPane">
          <span>OneAssist Extended Warranty for ₹450</span>
        </div>"#,
    );
    let offers = extract_offers_from_html(&html, &ExtractionRules::default());
    assert_eq!(offers[0].brand, PlanBrand::OneAssist);
    assert_eq!(offers[1].brand, PlanBrand::Servify);
}

#[test]
fn page_without_section_uses_page_text() {
    let html = padded_page("<ul><li>Zopper 1 Year Extended Warranty at ₹299</li></ul>");
    let offers = extract_offers_from_html(&html, &ExtractionRules::default());
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].brand, PlanBrand::ZopperIndia);
}

#[test]
fn script_text_is_not_scanned() {
    let html = padded_page(
        r"<script>var offer = '1 Year Extended Warranty for ₹399';</script><p>No plans here</p>",
    );
    assert!(extract_offers_from_html(&html, &ExtractionRules::default()).is_empty());
}

#[test]
fn small_page_yields_no_offers() {
    let html = "<html><body><p>1 Year Extended Warranty for ₹399</p></body></html>";
    assert!(extract_offers_from_html(html, &ExtractionRules::default()).is_empty());
}

#[test]
fn page_without_offers_is_empty() {
    let html = padded_page("<h1>Godrej Mixer Grinder</h1><p>500 W motor</p>");
    assert!(extract_offers_from_html(&html, &ExtractionRules::default()).is_empty());
}
