//! Serialised blobs restore measures that format and convert identically

mod common;

use common::{assert_approx, corpus};
use metron_core::{FormatOptions, Measure, PowerStyle, StringFormatter, UnitText};
use pretty_assertions::assert_eq;

fn formatters() -> Vec<StringFormatter> {
    vec![
        StringFormatter::symbols(),
        StringFormatter::names(),
        StringFormatter::new(FormatOptions {
            unit_text: UnitText::Name,
            pow: PowerStyle::Symbol,
            ..FormatOptions::default()
        }),
        StringFormatter::new(FormatOptions {
            times: " x ".to_string(),
            per: " per ".to_string(),
            parentheses: false,
            ..FormatOptions::default()
        }),
    ]
}

#[test]
fn test_round_trip_formats_identically() {
    let c = corpus();
    let samples = vec![
        c.meters.clone(),
        c.celsius.clone(),
        c.kilo.apply(&c.joules).unwrap().over(&c.celsius),
        c.meters.squared().over(&c.grams.times(&c.seconds)),
        c.mebi.apply(&c.bytes).unwrap().per(&c.seconds),
        c.seconds.reciprocal().times(&c.fahrenheit),
    ];

    for measure in samples {
        let restored: Measure = Measure::from_json(&measure.to_json().unwrap()).unwrap();
        for formatter in formatters() {
            for plural in [false, true] {
                assert_eq!(
                    restored.format(plural, &formatter),
                    measure.format(plural, &formatter)
                );
            }
        }
    }
}

#[test]
fn test_round_trip_converts_identically() {
    let c = corpus();
    let celsius: Measure = Measure::from_json(&c.celsius.to_json().unwrap()).unwrap();
    let fahrenheit: Measure = Measure::from_json(&c.fahrenheit.to_json().unwrap()).unwrap();

    let converter = celsius.create_converter_to(&fahrenheit).unwrap();
    assert_approx(converter.convert(&100.0), 212.0);

    // restored measures still work alongside the corpus ones
    assert!(celsius.is_compatible_with(&c.kelvin));
    assert_approx(celsius.create_converter_to(&c.kelvin).unwrap().convert(&0.0), 273.15);
}

#[test]
fn test_blob_is_plain_data() {
    let c = corpus();
    let blob = c.kilo.apply(&c.meters).unwrap().serialise();

    assert_eq!(blob.symbol, "km");
    assert_eq!(blob.unit.get("length"), Some(&1));
    assert_eq!(blob.unit_system.len(), 5);
    assert!(blob.allowed_prefixes.is_empty());
    assert_eq!(Measure::deserialise(&blob).unwrap().identifiers().name_singular, "kilometer");
}
