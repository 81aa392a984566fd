//! Test harness for running fixtures with stochastic variations

use crate::common::{ExpectedEvent, Gen, TestCase};
use rvjson_core::{parse_events, Event, ParseError, Validator};

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub input: Vec<u8>,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
    pub seed: u64,
    pub errors: Vec<String>,
}

/// Collect events from parsing, with the parse outcome
///
/// Duplicate names are refused; the refused event is still recorded.
pub fn collect_events(input: &[u8]) -> (Vec<Event<'_>>, Result<(), ParseError>) {
    let mut events = Vec::new();
    let mut keys = Validator::new();
    let result = parse_events(input, |e| {
        events.push(e);
        e.forward(&mut keys)
    });
    (events, result)
}

/// Format event for comparison
pub fn format_event(event: &Event) -> String {
    match event {
        Event::BeginObject => "BeginObject".to_string(),
        Event::EndObject => "EndObject".to_string(),
        Event::BeginArray => "BeginArray".to_string(),
        Event::EndArray => "EndArray".to_string(),
        Event::Null => "Null".to_string(),
        Event::Bool(b) => format!("Bool {:?}", b.to_string()),
        Event::Number(n) => format!("Number {:?}", n.to_string()),
        Event::Name(content) => format!("Name {:?}", String::from_utf8_lossy(content)),
        Event::String(content) => format!("String {:?}", String::from_utf8_lossy(content)),
    }
}

/// Format expected event for comparison
fn format_expected(event: &ExpectedEvent) -> String {
    match event {
        ExpectedEvent::Bare(name) => name.clone(),
        // Numbers are written as literals; compare by value.
        ExpectedEvent::WithContent(name, content) if name == "Number" => {
            let value: f64 = content
                .parse()
                .unwrap_or_else(|e| panic!("Bad number {:?} in fixture: {}", content, e));
            format!("Number {:?}", value.to_string())
        }
        ExpectedEvent::WithContent(name, content) => format!("{} {:?}", name, content),
    }
}

fn check(case: &TestCase, input: Vec<u8>, shift: usize, seed: u64, exact: bool) -> TestResult {
    let (events, result) = collect_events(&input);
    let actual: Vec<String> = events.iter().map(format_event).collect();
    let expected: Vec<String> = case.events.iter().map(format_expected).collect();

    let mut errors = Vec::new();

    match (&case.error, result) {
        (None, Err(err)) => errors.push(format!("Unexpected error: {}", err)),
        (Some(want), Ok(())) => errors.push(format!(
            "Expected {} at byte {}, parse succeeded",
            want.kind(),
            want.offset() + shift
        )),
        (Some(want), Err(err)) => {
            if err.kind() != want.kind() || err.offset() != want.offset() + shift {
                errors.push(format!(
                    "Expected {} at byte {}, got {}",
                    want.kind(),
                    want.offset() + shift,
                    err
                ));
            }
        }
        (None, Ok(())) => {}
    }

    // Error fixtures may list only the events before the failure.
    if exact || case.error.is_none() {
        if actual.len() != expected.len() && !(case.error.is_some() && expected.is_empty()) {
            errors.push(format!(
                "Event count mismatch: expected {}, got {}",
                expected.len(),
                actual.len()
            ));
        }
        for (i, (act, exp)) in actual.iter().zip(expected.iter()).enumerate() {
            if act != exp {
                errors.push(format!("Event {}: expected '{}', got '{}'", i, exp, act));
            }
        }
    }

    TestResult {
        passed: errors.is_empty(),
        input,
        expected,
        actual,
        seed,
        errors,
    }
}

/// Run a single test case (canonical, no variations)
pub fn run_test(case: &TestCase) -> TestResult {
    check(case, case.json.as_bytes().to_vec(), 0, 0, true)
}

/// Run test with stochastic variations
///
/// Applies independent variations:
/// - Random leading whitespace (shifts expected error offsets)
/// - For valid documents, each separator space becomes a random run
/// - For valid documents, 40% chance of trailing bytes after the object
pub fn run_with_variations(case: &TestCase, gen: &mut Gen) -> TestResult {
    let mut input = gen.whitespace();
    let shift = input.len();

    if case.error.is_some() {
        input.extend(case.json.as_bytes());
    } else {
        let mut in_string = false;
        let mut escaped = false;
        for &b in case.json.as_bytes() {
            if in_string {
                input.push(b);
                match (escaped, b) {
                    (true, _) => escaped = false,
                    (false, b'\\') => escaped = true,
                    (false, b'"') => in_string = false,
                    _ => {}
                }
            } else if b == b' ' {
                input.push(b' ');
                input.extend(gen.whitespace());
            } else {
                in_string = b == b'"';
                input.push(b);
            }
        }
        if gen.chance(0.4) {
            input.extend(gen.whitespace());
            input.extend(b"trailing [ garbage");
        }
    }

    check(case, input, shift, gen.seed, false)
}

impl TestResult {
    /// Print detailed failure info
    pub fn print_failure(&self, case_id: &str) {
        eprintln!("\n=== FAILED: {} ===", case_id);
        eprintln!("Seed: {} (set RVJSON_TEST_SEED={} to reproduce)", self.seed, self.seed);
        eprintln!("\nInput:");
        eprintln!("{}", String::from_utf8_lossy(&self.input));
        eprintln!("\nExpected events:");
        for (i, e) in self.expected.iter().enumerate() {
            eprintln!("  {}: {}", i, e);
        }
        eprintln!("\nActual events:");
        for (i, e) in self.actual.iter().enumerate() {
            eprintln!("  {}: {}", i, e);
        }
        eprintln!("\nErrors:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}
