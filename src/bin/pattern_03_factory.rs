use colored::Colorize;
use std::fmt;
use std::io::{self, BufRead, Write};

// =============================================================================
// Factory: car models
//
// A closed set of model names maps to predefined specification bundles.
// Every request builds a fresh Car; an unknown name is an explicit
// not-found, never a default.
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub model: &'static str,
    pub horsepower: u32,
    pub weight: u32,
    pub price: u32,
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: {}", self.model)?;
        writeln!(f, "Horsepower: {}", self.horsepower)?;
        writeln!(f, "Weight: {}", self.weight)?;
        write!(f, "Price: {}", self.price)
    }
}

pub const CAR_MODELS: [&str; 6] = [
    "Sedan",
    "SUV",
    "Sports Car",
    "Hatchback",
    "Convertible",
    "Pickup Truck",
];

pub struct CarFactory;

impl CarFactory {
    /// Build a car for a known model name. Unknown names yield `None`.
    pub fn create(model: &str) -> Option<Car> {
        let car = match model {
            "Sedan" => Car {
                model: "Sedan",
                horsepower: 150,
                weight: 1500,
                price: 30_000,
            },
            "SUV" => Car {
                model: "SUV",
                horsepower: 200,
                weight: 2000,
                price: 40_000,
            },
            "Sports Car" => Car {
                model: "Sports Car",
                horsepower: 300,
                weight: 1200,
                price: 60_000,
            },
            "Hatchback" => Car {
                model: "Hatchback",
                horsepower: 120,
                weight: 1300,
                price: 25_000,
            },
            "Convertible" => Car {
                model: "Convertible",
                horsepower: 250,
                weight: 1400,
                price: 50_000,
            },
            "Pickup Truck" => Car {
                model: "Pickup Truck",
                horsepower: 180,
                weight: 2200,
                price: 35_000,
            },
            _ => return None,
        };
        Some(car)
    }
}

// =============================================================================
// Interactive driver
// =============================================================================

/// Translate a menu entry into a model name.
///
/// The original system indexed straight into the list and crashed on bad
/// input; selection is validated here at the boundary instead.
fn model_for_choice(entry: &str) -> Option<&'static str> {
    let index: usize = entry.trim().parse().ok()?;
    if (1..=CAR_MODELS.len()).contains(&index) {
        Some(CAR_MODELS[index - 1])
    } else {
        None
    }
}

pub fn run<R: BufRead, W: Write>(mut input: R, out: &mut W) -> io::Result<()> {
    loop {
        writeln!(out, "\n--- Car Factory ---")?;
        writeln!(out, "\nAvailable Car Models:")?;
        for (i, model) in CAR_MODELS.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, model)?;
        }
        write!(out, "Choose a car model by entering the corresponding number: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out, "Exiting the Car Factory.")?;
            break;
        }

        match model_for_choice(&line).and_then(CarFactory::create) {
            Some(car) => {
                writeln!(out, "\n{}", "Car Specifications:".bold())?;
                writeln!(out, "{car}")?;
            }
            None => {
                writeln!(out, "{}", "Unknown car model selected.".red())?;
            }
        }

        write!(out, "\nDo you want to choose another car model? (yes/no): ")?;
        out.flush()?;

        let mut again = String::new();
        input.read_line(&mut again)?;
        if !again.trim().eq_ignore_ascii_case("yes") {
            writeln!(out, "Exiting the Car Factory.")?;
            break;
        }
    }

    Ok(())
}

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    run(stdin.lock(), &mut io::stdout())
}

// =============================================================================
// Tests
// =============================================================================
