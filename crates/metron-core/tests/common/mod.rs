//! Shared measure corpus for integration tests
#![allow(dead_code)]

use std::sync::Arc;

use metron_core::{AutoCompleter, Measure, MeasureAlias, Prefix, PrefixMask, UnitSystem};

pub const SI_MULTIPLE: &str = "SI_MULTIPLE";
pub const SI_SUBMULTIPLE: &str = "SI_SUBMULTIPLE";
pub const BINARY: &str = "BINARY";

pub struct Corpus {
    pub system: Arc<UnitSystem>,

    pub meters: Measure,
    pub grams: Measure,
    pub feet: Measure,
    pub inches: Measure,
    pub seconds: Measure,
    pub minutes: Measure,
    pub hours: Measure,
    pub newtons: Measure,
    pub joules: Measure,
    pub kelvin: Measure,
    pub celsius: Measure,
    pub fahrenheit: Measure,
    pub bits: Measure,
    pub bytes: Measure,

    pub kilo: Prefix,
    pub mega: Prefix,
    pub centi: Prefix,
    pub milli: Prefix,
    pub micro: Prefix,
    pub kibi: Prefix,
    pub mebi: Prefix,
    pub gibi: Prefix,
}

impl Corpus {
    pub fn measures(&self) -> Vec<Measure> {
        vec![
            self.meters.clone(),
            self.grams.clone(),
            self.feet.clone(),
            self.inches.clone(),
            self.seconds.clone(),
            self.minutes.clone(),
            self.hours.clone(),
            self.newtons.clone(),
            self.joules.clone(),
            self.kelvin.clone(),
            self.celsius.clone(),
            self.fahrenheit.clone(),
            self.bits.clone(),
            self.bytes.clone(),
        ]
    }

    pub fn prefixes(&self) -> Vec<Prefix> {
        vec![
            self.kilo.clone(),
            self.mega.clone(),
            self.centi.clone(),
            self.milli.clone(),
            self.micro.clone(),
            self.kibi.clone(),
            self.mebi.clone(),
            self.gibi.clone(),
        ]
    }

    pub fn aliases(&self) -> Vec<MeasureAlias> {
        vec![
            MeasureAlias::new(self.celsius.clone(), ["Celsius", "degrees", "degrees C"]),
            MeasureAlias::new(self.kilo.apply(&self.meters).unwrap(), ["k"]),
        ]
    }

    pub fn completer(&self) -> AutoCompleter {
        AutoCompleter::new(self.measures(), self.prefixes(), self.aliases())
    }
}

pub fn corpus() -> Corpus {
    let system = UnitSystem::new([
        ("length", "m"),
        ("mass", "g"),
        ("time", "s"),
        ("temperature", "K"),
        ("memory", "b"),
    ]);
    let si = PrefixMask::new([SI_MULTIPLE, SI_SUBMULTIPLE]);
    let none = PrefixMask::none;

    let meters = Measure::dimension(&system, "length", ("meter", "meters", "m"), si.clone()).unwrap();
    let grams = Measure::dimension(&system, "mass", ("gram", "grams", "g"), si.clone()).unwrap();
    let seconds = Measure::dimension(&system, "time", ("second", "seconds", "s"), si.clone()).unwrap();
    let kelvin = Measure::dimension(&system, "temperature", ("kelvin", "kelvins", "K"), si.clone()).unwrap();
    let bits = Measure::dimension(
        &system,
        "memory",
        ("bit", "bits", "b"),
        PrefixMask::new([SI_MULTIPLE]),
    )
    .unwrap();

    let feet = Measure::of(0.3048, &meters, ("foot", "feet", "ft"), none());
    let inches = Measure::of(1.0 / 12.0, &feet, ("inch", "inches", "in"), none());
    let minutes = Measure::of(60.0, &seconds, ("minute", "minutes", "min"), none());
    let hours = Measure::of(60.0, &minutes, ("hour", "hours", "hr"), none());
    let newtons = Measure::of(
        1000.0,
        &grams.times(&meters).over(&seconds.squared()),
        ("newton", "newtons", "N"),
        si.clone(),
    );
    let joules = Measure::of(1.0, &newtons.times(&meters), ("joule", "joules", "J"), si);

    let celsius = Measure::offset_from(
        &kelvin,
        1.0,
        273.15,
        ("degree Celsius", "degrees Celsius", "°C"),
        none(),
    )
    .redirect_if_manipulated(&Measure::of(
        1.0,
        &kelvin,
        ("degree Celsius difference", "degrees Celsius difference", "Δ°C"),
        none(),
    ))
    .unwrap();
    let fahrenheit = Measure::offset_from(
        &kelvin,
        5.0 / 9.0,
        459.67,
        ("degree Fahrenheit", "degrees Fahrenheit", "°F"),
        none(),
    )
    .redirect_if_manipulated(&Measure::of(
        5.0 / 9.0,
        &kelvin,
        ("degree Fahrenheit difference", "degrees Fahrenheit difference", "Δ°F"),
        none(),
    ))
    .unwrap();
    let bytes = Measure::of(8.0, &bits, ("byte", "bytes", "B"), PrefixMask::new([BINARY, SI_MULTIPLE]));

    let multiple = || PrefixMask::new([SI_MULTIPLE]);
    let submultiple = || PrefixMask::new([SI_SUBMULTIPLE]);
    let binary = || PrefixMask::new([BINARY]);

    Corpus {
        kilo: Prefix::new("kilo", "k", 1e3, multiple()),
        mega: Prefix::new("mega", "M", 1e6, multiple()),
        centi: Prefix::new("centi", "c", 1e-2, submultiple()),
        milli: Prefix::new("milli", "m", 1e-3, submultiple()),
        micro: Prefix::new("micro", "µ", 1e-6, submultiple()),
        kibi: Prefix::new("kibi", "Ki", 1024.0, binary()),
        mebi: Prefix::new("mebi", "Mi", 1024.0 * 1024.0, binary()),
        gibi: Prefix::new("gibi", "Gi", 1024.0 * 1024.0 * 1024.0, binary()),

        system,
        meters,
        grams,
        feet,
        inches,
        seconds,
        minutes,
        hours,
        newtons,
        joules,
        kelvin,
        celsius,
        fahrenheit,
        bits,
        bytes,
    }
}

pub fn assert_approx(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
