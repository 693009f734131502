//! Built-in unit definitions organized by measure
//!
//! Every measure anchors each system on one unit (scale 1). Cross-system
//! anchors are declared in both directions. Abbreviations are unique across
//! the whole set.

use crate::{AnchorTransform, Measure, Unit, UnitRegistry, UnitSystem, IMPERIAL, METRIC};

/// The built-in registry
pub fn registry() -> UnitRegistry {
    UnitRegistry::new()
        .with_measure(length())
        .with_measure(area())
        .with_measure(volume())
        .with_measure(mass())
        .with_measure(temperature())
        .with_measure(speed())
        .with_measure(pressure())
        .with_measure(energy())
        .with_measure(power())
        .with_measure(time())
        .with_measure(frequency())
        .with_measure(electric_potential())
        .with_measure(electric_current())
        .with_measure(data())
}

/// Proportional anchors in both directions
fn bridged(measure: Measure, metric_to_imperial: f64) -> Measure {
    measure
        .with_anchor(METRIC, IMPERIAL, AnchorTransform::ratio(metric_to_imperial))
        .with_anchor(IMPERIAL, METRIC, AnchorTransform::ratio(1.0 / metric_to_imperial))
}

fn length() -> Measure {
    bridged(Measure::new("length")
        // anchor: meter
        .with_system(UnitSystem::new(METRIC)
            .with_unit("mm", Unit::new("millimeter", 0.001).with_tags(["millimeter", "millimeters"]))
            .with_unit("cm", Unit::new("centimeter", 0.01).with_tags(["centimeter", "centimeters"]))
            .with_unit("m", Unit::new("meter", 1.0).with_tags(["meter", "meters", "metre", "metres"]))
            .with_unit("km", Unit::new("kilometer", 1000.0).with_tags(["kilometer", "kilometers"])))
        // anchor: foot
        .with_system(UnitSystem::new(IMPERIAL)
            .with_unit("in", Unit::new("inch", 1.0 / 12.0).with_tags(["inch", "inches"]))
            .with_unit("ft", Unit::new("foot", 1.0).with_tags(["foot", "feet"]))
            .with_unit("yd", Unit::new("yard", 3.0).with_tags(["yard", "yards"]))
            .with_unit("mi", Unit::new("mile", 5280.0).with_tags(["mile", "miles"]))
            .with_unit("nmi", Unit::new("nautical mile", 6076.12).with_tags(["nautical", "marine"]))),
        3.28084)
}

fn area() -> Measure {
    bridged(Measure::new("area")
        // anchor: square meter
        .with_system(UnitSystem::new(METRIC)
            .with_unit("mm²", Unit::new("square millimeter", 1e-6))
            .with_unit("cm²", Unit::new("square centimeter", 1e-4))
            .with_unit("m²", Unit::new("square meter", 1.0).with_tags(["sqm"]))
            .with_unit("ha", Unit::new("hectare", 1e4).with_tags(["hectare", "hectares"]))
            .with_unit("km²", Unit::new("square kilometer", 1e6)))
        // anchor: square foot
        .with_system(UnitSystem::new(IMPERIAL)
            .with_unit("in²", Unit::new("square inch", 1.0 / 144.0))
            .with_unit("ft²", Unit::new("square foot", 1.0).with_tags(["sqft"]))
            .with_unit("yd²", Unit::new("square yard", 9.0))
            .with_unit("ac", Unit::new("acre", 43560.0).with_tags(["acre", "acres"]))
            .with_unit("mi²", Unit::new("square mile", 27_878_400.0))),
        10.7639)
}

fn volume() -> Measure {
    bridged(Measure::new("volume")
        // anchor: liter
        .with_system(UnitSystem::new(METRIC)
            .with_unit("mL", Unit::new("milliliter", 0.001).with_tags(["milliliter", "ml", "cc"]))
            .with_unit("L", Unit::new("liter", 1.0).with_tags(["liter", "litre", "liters"]))
            .with_unit("m³", Unit::new("cubic meter", 1000.0).with_tags(["cubic meter"])))
        // anchor: US fluid ounce
        .with_system(UnitSystem::new(IMPERIAL)
            .with_unit("tsp", Unit::new("teaspoon", 1.0 / 6.0).with_tags(["teaspoon"]))
            .with_unit("tbsp", Unit::new("tablespoon", 0.5).with_tags(["tablespoon"]))
            .with_unit("fl-oz", Unit::new("fluid ounce", 1.0).with_tags(["floz", "fluid ounce"]))
            .with_unit("cup", Unit::new("cup", 8.0))
            .with_unit("pt", Unit::new("pint", 16.0).with_tags(["pint", "pints"]))
            .with_unit("qt", Unit::new("quart", 32.0).with_tags(["quart", "quarts"]))
            .with_unit("gal", Unit::new("gallon", 128.0).with_tags(["gallon", "gallons"]))
            .with_unit("ft³", Unit::new("cubic foot", 957.506))),
        33.8140226)
}

fn mass() -> Measure {
    bridged(Measure::new("mass")
        // anchor: gram
        .with_system(UnitSystem::new(METRIC)
            .with_unit("mg", Unit::new("milligram", 0.001).with_tags(["milligram"]))
            .with_unit("g", Unit::new("gram", 1.0).with_tags(["gram", "grams"]))
            .with_unit("kg", Unit::new("kilogram", 1000.0).with_tags(["kilogram", "kilograms", "kilo"]))
            .with_unit("t", Unit::new("tonne", 1e6).with_tags(["tonne", "metric ton"])))
        // anchor: pound
        .with_system(UnitSystem::new(IMPERIAL)
            .with_unit("oz", Unit::new("ounce", 1.0 / 16.0).with_tags(["ounce", "ounces"]))
            .with_unit("lb", Unit::new("pound", 1.0).with_tags(["pound", "pounds", "lbs"]))
            .with_unit("st", Unit::new("stone", 14.0).with_tags(["stone"]))
            .with_unit("ton", Unit::new("short ton", 2000.0).with_tags(["short ton"]))),
        1.0 / 453.592)
}

fn temperature() -> Measure {
    Measure::new("temperature")
        // anchor: celsius
        .with_system(UnitSystem::new(METRIC)
            .with_unit("°C", Unit::new("celsius", 1.0).with_shift(0.0).with_tags(["celsius", "centigrade"]))
            .with_unit("K", Unit::new("kelvin", 1.0).with_shift(273.15).with_tags(["kelvin"])))
        // anchor: fahrenheit
        .with_system(UnitSystem::new(IMPERIAL)
            .with_unit("°F", Unit::new("fahrenheit", 1.0).with_shift(0.0).with_tags(["fahrenheit"]))
            .with_unit("°R", Unit::new("rankine", 1.0).with_shift(459.67).with_tags(["rankine"])))
        .with_anchor(METRIC, IMPERIAL, AnchorTransform::function(|c| c * 9.0 / 5.0 + 32.0))
        .with_anchor(IMPERIAL, METRIC, AnchorTransform::function(|f| (f - 32.0) * 5.0 / 9.0))
}

fn speed() -> Measure {
    bridged(Measure::new("speed")
        // anchor: meter per second
        .with_system(UnitSystem::new(METRIC)
            .with_unit("m/s", Unit::new("meter per second", 1.0))
            .with_unit("km/h", Unit::new("kilometer per hour", 1.0 / 3.6).with_tags(["kph", "kmh"])))
        // anchor: foot per second
        .with_system(UnitSystem::new(IMPERIAL)
            .with_unit("ft/s", Unit::new("foot per second", 1.0).with_tags(["fps"]))
            .with_unit("mph", Unit::new("mile per hour", 5280.0 / 3600.0))
            .with_unit("kn", Unit::new("knot", 1.68781).with_tags(["knot", "knots"]))),
        3.28084)
}

fn pressure() -> Measure {
    bridged(Measure::new("pressure")
        // anchor: pascal
        .with_system(UnitSystem::new(METRIC)
            .with_unit("Pa", Unit::new("pascal", 1.0).with_tags(["pascal"]))
            .with_unit("hPa", Unit::new("hectopascal", 100.0))
            .with_unit("kPa", Unit::new("kilopascal", 1000.0))
            .with_unit("MPa", Unit::new("megapascal", 1e6))
            .with_unit("mbar", Unit::new("millibar", 100.0))
            .with_unit("bar", Unit::new("bar", 1e5))
            .with_unit("mmHg", Unit::new("millimeter of mercury", 133.322))
            .with_unit("atm", Unit::new("atmosphere", 101_325.0).with_tags(["atmosphere"])))
        // anchor: pound per square inch
        .with_system(UnitSystem::new(IMPERIAL)
            .with_unit("psi", Unit::new("pound per square inch", 1.0))
            .with_unit("ksi", Unit::new("kilopound per square inch", 1000.0))
            .with_unit("inHg", Unit::new("inch of mercury", 0.491154))),
        0.000145038)
}

fn energy() -> Measure {
    bridged(Measure::new("energy")
        // anchor: joule
        .with_system(UnitSystem::new(METRIC)
            .with_unit("J", Unit::new("joule", 1.0).with_tags(["joule", "joules"]))
            .with_unit("kJ", Unit::new("kilojoule", 1000.0))
            .with_unit("Wh", Unit::new("watt-hour", 3600.0))
            .with_unit("kWh", Unit::new("kilowatt-hour", 3.6e6))
            .with_unit("cal", Unit::new("calorie", 4.184).with_tags(["calorie"]))
            .with_unit("kcal", Unit::new("kilocalorie", 4184.0).with_tags(["kilocalorie"])))
        // anchor: british thermal unit
        .with_system(UnitSystem::new(IMPERIAL)
            .with_unit("BTU", Unit::new("british thermal unit", 1.0))
            .with_unit("therm", Unit::new("therm", 100_000.0))),
        1.0 / 1055.06)
}

fn power() -> Measure {
    bridged(Measure::new("power")
        // anchor: watt
        .with_system(UnitSystem::new(METRIC)
            .with_unit("mW", Unit::new("milliwatt", 0.001))
            .with_unit("W", Unit::new("watt", 1.0).with_tags(["watt", "watts"]))
            .with_unit("kW", Unit::new("kilowatt", 1000.0))
            .with_unit("MW", Unit::new("megawatt", 1e6)))
        // anchor: foot-pound per second
        .with_system(UnitSystem::new(IMPERIAL)
            .with_unit("ft-lb/s", Unit::new("foot-pound per second", 1.0))
            .with_unit("BTU/h", Unit::new("british thermal unit per hour", 0.216158))
            .with_unit("hp", Unit::new("horsepower", 550.0).with_tags(["horsepower"]))),
        0.737562149)
}

fn time() -> Measure {
    Measure::new("time")
        // anchor: second
        .with_system(UnitSystem::new(METRIC)
            .with_unit("ms", Unit::new("millisecond", 0.001))
            .with_unit("s", Unit::new("second", 1.0).with_tags(["second", "seconds", "sec"]))
            .with_unit("min", Unit::new("minute", 60.0).with_tags(["minute", "minutes"]))
            .with_unit("h", Unit::new("hour", 3600.0).with_tags(["hour", "hours", "hr"]))
            .with_unit("d", Unit::new("day", 86_400.0).with_tags(["day", "days"]))
            .with_unit("wk", Unit::new("week", 604_800.0).with_tags(["week", "weeks"])))
}

fn frequency() -> Measure {
    Measure::new("frequency")
        // anchor: hertz
        .with_system(UnitSystem::new(METRIC)
            .with_unit("Hz", Unit::new("hertz", 1.0).with_tags(["hertz"]))
            .with_unit("kHz", Unit::new("kilohertz", 1e3))
            .with_unit("MHz", Unit::new("megahertz", 1e6))
            .with_unit("GHz", Unit::new("gigahertz", 1e9))
            .with_unit("rpm", Unit::new("revolutions per minute", 1.0 / 60.0)))
}

fn electric_potential() -> Measure {
    Measure::new("electric potential")
        // anchor: volt
        .with_system(UnitSystem::new(METRIC)
            .with_unit("mV", Unit::new("millivolt", 0.001))
            .with_unit("V", Unit::new("volt", 1.0).with_tags(["volt", "volts", "voltage"]))
            .with_unit("kV", Unit::new("kilovolt", 1000.0)))
}

fn electric_current() -> Measure {
    Measure::new("electric current")
        // anchor: ampere
        .with_system(UnitSystem::new(METRIC)
            .with_unit("mA", Unit::new("milliampere", 0.001))
            .with_unit("A", Unit::new("ampere", 1.0).with_tags(["ampere", "amp", "amps"])))
}

fn data() -> Measure {
    Measure::new("data")
        // anchor: byte
        .with_system(UnitSystem::new(METRIC)
            .with_unit("bit", Unit::new("bit", 0.125).with_tags(["bits"]))
            .with_unit("B", Unit::new("byte", 1.0).with_tags(["byte", "bytes"]))
            .with_unit("kB", Unit::new("kilobyte", 1e3))
            .with_unit("MB", Unit::new("megabyte", 1e6))
            .with_unit("GB", Unit::new("gigabyte", 1e9))
            .with_unit("KiB", Unit::new("kibibyte", 1024.0))
            .with_unit("MiB", Unit::new("mebibyte", 1_048_576.0)))
}
