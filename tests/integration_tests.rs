// Parser robustness tests for Tally
//
// Table-driven suites of inputs that must parse, or must be rejected with a
// particular diagnostic. Everything runs under one #[test] so the summary
// output stays together.

use tally::ast::Program;
use tally::error::TallyError;
use tally::parser;

/// Test result for a single test case
#[derive(Debug)]
pub enum TestResult {
    Pass,
    Fail(String),
    Crash(String),
}

#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    pub should_succeed: bool,
    pub expected_error_contains: Option<String>,
}

impl TestCase {
    pub fn should_succeed(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: true,
            expected_error_contains: None,
        }
    }

    pub fn should_fail(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: false,
            expected_error_contains: None,
        }
    }

    pub fn should_fail_with_message(name: &str, input: &str, expected_msg: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: false,
            expected_error_contains: Some(expected_msg.to_string()),
        }
    }
}

#[derive(Debug)]
pub struct TestSuite {
    pub name: String,
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tests: Vec::new(),
        }
    }

    pub fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    pub fn run(&self) -> TestSuiteResults {
        let mut results = TestSuiteResults::new(&self.name);

        println!("Running test suite: {}", self.name);
        println!("{}", "=".repeat(50));

        for test in &self.tests {
            results.add_result(&test.name, run_single_test(test));
        }

        results.print_summary();
        results
    }
}

#[derive(Debug)]
pub struct TestSuiteResults {
    pub suite_name: String,
    pub results: Vec<(String, TestResult)>,
    pub passed: usize,
    pub failed: usize,
    pub crashed: usize,
}

impl TestSuiteResults {
    pub fn new(suite_name: &str) -> Self {
        Self {
            suite_name: suite_name.to_string(),
            results: Vec::new(),
            passed: 0,
            failed: 0,
            crashed: 0,
        }
    }

    pub fn add_result(&mut self, test_name: &str, result: TestResult) {
        match &result {
            TestResult::Pass => {
                self.passed += 1;
                println!("  ok   {}", test_name);
            }
            TestResult::Fail(msg) => {
                self.failed += 1;
                println!("  FAIL {}: {}", test_name, msg);
            }
            TestResult::Crash(msg) => {
                self.crashed += 1;
                println!("  CRASH {}: {}", test_name, msg);
            }
        }
        self.results.push((test_name.to_string(), result));
    }

    pub fn print_summary(&self) {
        println!();
        println!(
            "{}: {} passed, {} failed, {} crashed of {}",
            self.suite_name,
            self.passed,
            self.failed,
            self.crashed,
            self.results.len()
        );
        println!();
    }

    pub fn is_all_passed(&self) -> bool {
        self.crashed == 0 && self.failed == 0
    }
}

fn run_single_test(test: &TestCase) -> TestResult {
    let result = std::panic::catch_unwind(|| parse_input(&test.input));

    match result {
        Ok(parse_result) => match (parse_result, test.should_succeed) {
            (Ok(_), true) => TestResult::Pass,
            (Ok(program), false) => TestResult::Fail(format!(
                "Expected parsing to fail, but it produced: {}",
                program.render(true).trim_end()
            )),
            (Err(error), false) => match &test.expected_error_contains {
                Some(expected) if !error.message.contains(expected.as_str()) => {
                    TestResult::Fail(format!(
                        "Error message '{}' doesn't contain expected text '{}'",
                        error.message, expected
                    ))
                }
                _ => TestResult::Pass,
            },
            (Err(error), true) => TestResult::Fail(format!(
                "Expected parsing to succeed, but got error: {}",
                error
            )),
        },
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Unknown panic".to_string()
            };
            TestResult::Crash(panic_msg)
        }
    }
}

fn parse_input(input: &str) -> Result<Program, TallyError> {
    parser::parse(input)
}

// ============================================================================
// Suites
// ============================================================================

fn create_parentheses_tests() -> TestSuite {
    let mut suite = TestSuite::new("Parentheses");

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_paren",
        "(1 + 2;",
        "Expected ')' after expression",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_paren_at_eof",
        "((1 + 2)",
        "Expected ')' after expression",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_closing_paren",
        ") + 1;",
        "Expected expression, found ')'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "empty_parens",
        "();",
        "Empty parentheses are not allowed",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "trailing_closing_paren",
        "1 + 2);",
        "Missing semicolon",
    ));
    suite.add_test(TestCase::should_succeed("nested_groups", "((1 + 2) * (3 - 4));"));
    suite.add_test(TestCase::should_succeed("group_of_variable", "(x) + 1;"));

    suite
}

fn create_statement_tests() -> TestSuite {
    let mut suite = TestSuite::new("Statements");

    suite.add_test(TestCase::should_succeed("empty_program", ""));
    suite.add_test(TestCase::should_succeed("whitespace_only", "  \n\t "));
    suite.add_test(TestCase::should_succeed("declaration", "var a = 1;"));
    suite.add_test(TestCase::should_succeed("reassignment", "a = a + 1;"));
    suite.add_test(TestCase::should_succeed("print_variable", "a;"));
    suite.add_test(TestCase::should_succeed(
        "several_lines",
        "var a = 3.3;\nvar b = a less_than 4;\nb;\n",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "missing_semicolon",
        "1 + 2",
        "Missing semicolon",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_semicolon_between_statements",
        "var a = 1 a;",
        "Missing semicolon",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "var_without_name",
        "var = 1;",
        "Missing identifier after 'var'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "var_on_keyword",
        "var pi2 sin = 1;",
        "Missing '=' after variable name",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "var_without_value",
        "var a = ;",
        "Expected expression, found ';'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "assignment_without_value",
        "a = ;",
        "Expected expression, found ';'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "empty_statement",
        ";",
        "Expected expression, found ';'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "var_inside_expression",
        "1 + var;",
        "Expected expression, found 'var'",
    ));
    suite.add_test(TestCase::should_fail("literal_target", "1 = x;"));

    suite
}

fn create_operator_tests() -> TestSuite {
    let mut suite = TestSuite::new("Operators");

    suite.add_test(TestCase::should_succeed("precedence", "1 + 2 * 3 - 4 / 5 % 6;"));
    suite.add_test(TestCase::should_succeed("power_chain", "2 ^ 3 ^ 2;"));
    suite.add_test(TestCase::should_succeed("signed_primary", "-2 ^ 2;"));
    suite.add_test(TestCase::should_succeed("sign_on_group", "-(-1);"));
    suite.add_test(TestCase::should_succeed("plus_sign", "+5;"));

    suite.add_test(TestCase::should_fail_with_message(
        "double_sign",
        "--1;",
        "Expected expression, found '-'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "dangling_operator",
        "1 +;",
        "Expected expression, found ';'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "operator_at_eof",
        "1 *",
        "Expected expression, found end of input",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "leading_binary_operator",
        "* 2;",
        "Expected expression, found '*'",
    ));

    suite
}

fn create_boolean_tests() -> TestSuite {
    let mut suite = TestSuite::new("Booleans and comparisons");

    suite.add_test(TestCase::should_succeed("literals", "true and false or true;"));
    suite.add_test(TestCase::should_succeed("comparison", "1 less_than 2;"));
    suite.add_test(TestCase::should_succeed(
        "all_comparisons",
        "1 equal_to 1 and 1 not_equal_to 2 and 1 less_than 2 and 2 greater_than 1;",
    ));
    suite.add_test(TestCase::should_succeed("not_comparison", "not 1 greater_than 2;"));
    suite.add_test(TestCase::should_succeed("not_group", "not (not true);"));
    suite.add_test(TestCase::should_succeed(
        "mixed",
        "var a = 10;(a greater_than 100 or a less_than -100) and (a%2 equal_to 0);",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "chained_comparison",
        "1 less_than 2 less_than 3;",
        "Comparison operators cannot be chained",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "double_not",
        "not not true;",
        "Expected expression, found 'not'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "comparison_without_right",
        "1 equal_to;",
        "Expected expression, found ';'",
    ));

    suite
}

fn create_type_tests() -> TestSuite {
    let mut suite = TestSuite::new("Operand types");

    suite.add_test(TestCase::should_fail_with_message(
        "bool_in_addition",
        "(true) + 1;",
        "Bad data type for addition",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "bool_on_right_of_multiplication",
        "2 * false;",
        "Bad data type for multiplication",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "negated_bool",
        "-true;",
        "Bad data type for negative",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "not_of_number",
        "not 5;",
        "Bad data type for not",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "and_of_numbers",
        "1 and true;",
        "Bad data type for and",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "comparison_of_bools",
        "true equal_to false;",
        "Bad data type for equal_to",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "function_of_bool",
        "sin(true);",
        "Bad data type for sin",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "function_of_comparison",
        "sqrt(1 less_than 2);",
        "Bad data type for sqrt",
    ));

    // Variables are resolved at run time, so they fit anywhere.
    suite.add_test(TestCase::should_succeed("variable_in_arithmetic", "x * 2;"));
    suite.add_test(TestCase::should_succeed("variable_in_logic", "x and not y;"));

    suite
}

fn create_function_call_tests() -> TestSuite {
    let mut suite = TestSuite::new("Function calls");

    suite.add_test(TestCase::should_succeed(
        "every_function",
        "sin(1); cos(1); tan(1); asin(1); acos(1); atan(1); log(1); sqrt(1); Int(1);",
    ));
    suite.add_test(TestCase::should_succeed("nested_calls", "log(sqrt(e ^ 2));"));

    suite.add_test(TestCase::should_fail_with_message(
        "missing_opening_paren",
        "sin 1;",
        "Expected '(' after function name 'sin'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_closing_paren",
        "sqrt(2;",
        "Expected ')' after function argument",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "no_argument",
        "cos();",
        "Expected expression, found ')'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "two_arguments",
        "atan(1, 2);",
        "Unexpected character: ','",
    ));
    suite.add_test(TestCase::should_succeed("lowercase_int_is_a_variable", "int;"));

    suite
}

fn create_lexical_tests() -> TestSuite {
    let mut suite = TestSuite::new("Lexical");

    suite.add_test(TestCase::should_fail_with_message(
        "unknown_character",
        "1 # 2;",
        "Unexpected character: '#'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "symbolic_comparison",
        "1 < 2;",
        "Unexpected character: '<'",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "leading_dot",
        ".5;",
        "Unexpected character: '.'",
    ));
    suite.add_test(TestCase::should_succeed("trailing_dot", "7.;"));
    suite.add_test(TestCase::should_succeed("underscored_name", "var my_value2 = 1;"));

    suite
}

// ============================================================================
// Main Test Function
// ============================================================================

#[test]
fn comprehensive_parser_tests() {
    let suites = vec![
        create_parentheses_tests(),
        create_statement_tests(),
        create_operator_tests(),
        create_boolean_tests(),
        create_type_tests(),
        create_function_call_tests(),
        create_lexical_tests(),
    ];

    let mut failures = Vec::new();
    for suite in suites {
        let results = suite.run();
        if !results.is_all_passed() {
            failures.push(results.suite_name);
        }
    }

    assert!(failures.is_empty(), "failing suites: {:?}", failures);
}
