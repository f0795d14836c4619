// Forward and reverse routing through assembled tables

use http::Method;
use rstest::*;
use wayfinder_routes::{
	Params, Pattern, ResourceRoutes, RouteDefinition, RouteError, RouteGroup, RouteTable, RouterSettings,
};

fn params(pairs: &[(&str, &str)]) -> Params {
	pairs
		.iter()
		.map(|(k, v)| (k.to_string(), v.to_string()))
		.collect()
}

#[fixture]
fn instructor_lecture() -> RouteDefinition {
	RouteDefinition::new("/instructor/lectures/:id/:action")
		.expect("Valid pattern")
		.with_name("instructor_lecture")
		.with_static_params([("controller", "instructorLecture"), ("action", "show")])
}

// Test: Literal-only template matches itself and its slash-less form
#[rstest]
#[case("/about/", "/about/", true)]
#[case("/about/", "/about", true)]
#[case("/about/", "/about/us", false)]
#[case("/about", "/about/", false)]
#[case("/about", "/about", true)]
fn test_literal_template(#[case] template: &str, #[case] path: &str, #[case] expected: bool) {
	let pattern = Pattern::parse(template).expect("Valid pattern");
	assert_eq!(pattern.match_path(path).unwrap().is_some(), expected);
}

// Test: Regex metacharacters in literals are matched literally
#[rstest]
#[case("a.b(c)", true)]
#[case("axb(c)", false)]
#[case("a.bc", false)]
#[case("a.b(c)d", false)]
fn test_metacharacter_literal(#[case] path: &str, #[case] expected: bool) {
	let table = RouteTable::new(vec![
		RouteDefinition::new("a.b(c)").unwrap().prepare().unwrap(),
	])
	.unwrap();
	assert_eq!(table.match_forward(&Method::GET, path).is_some(), expected);
}

// Test: Optional trailing action takes its static value
#[rstest]
#[case("/instructor/lectures/1/edit", "edit")]
#[case("/instructor/lectures/1/", "show")]
#[case("/instructor/lectures/1", "show")]
fn test_instructor_lecture_forward(
	instructor_lecture: RouteDefinition,
	#[case] path: &str,
	#[case] action: &str,
) {
	let table = RouteTable::from_definitions(vec![instructor_lecture], &RouterSettings::default()).unwrap();
	let matched = table.match_forward(&Method::GET, path).unwrap();

	assert_eq!(
		matched.params,
		params(&[("controller", "instructorLecture"), ("action", action), ("id", "1")])
	);
}

// Test: Rendering leaves off an action equal to its static value
#[rstest]
fn test_instructor_lecture_reverse(instructor_lecture: RouteDefinition) {
	let table = RouteTable::from_definitions(vec![instructor_lecture], &RouterSettings::default()).unwrap();

	let path = table
		.build_path_by_name("instructor_lecture", &params(&[("id", "1")]), &Params::new())
		.unwrap();
	assert_eq!(path, "/instructor/lectures/1/");

	let path = table
		.build_path_by_name(
			"instructor_lecture",
			&params(&[("id", "1"), ("action", "edit")]),
			&Params::new(),
		)
		.unwrap();
	assert_eq!(path, "/instructor/lectures/1/edit");
}

// Test: Disallowed method never matches
#[rstest]
fn test_disallowed_method(instructor_lecture: RouteDefinition) {
	let route = instructor_lecture
		.with_methods([Method::GET, Method::HEAD])
		.prepare()
		.unwrap();
	assert!(route.match_forward("/instructor/lectures/1", &Method::POST).is_none());
	assert!(route.match_forward("/instructor/lectures/1", &Method::HEAD).is_some());
}

// Test: Optional static parameters do not count against a route
#[rstest]
fn test_optional_static_scoring() {
	let route = RouteDefinition::new("/lecture")
		.unwrap()
		.with_static_param("action", "index")
		.with_default_static_param("action", "index")
		.prepare()
		.unwrap();

	assert_eq!(route.match_reverse(&Params::new(), &Params::new()), 0);
	assert_eq!(route.match_reverse(&params(&[("action", "show")]), &Params::new()), -1);
}

// Test: A route with a controller and a defaulted action
#[rstest]
fn test_lecture_scoring() {
	let route = RouteDefinition::new("/lecture")
		.unwrap()
		.with_static_params([("controller", "lecture"), ("action", "index")])
		.with_default_static_param("action", "index")
		.prepare()
		.unwrap();
	assert_eq!(route.match_reverse(&params(&[("controller", "lecture")]), &Params::new()), 1);
}

// Test: Equal reverse scores keep the earlier route
#[rstest]
fn test_reverse_tie_break() {
	let table = RouteTable::from_definitions(
		vec![
			RouteDefinition::new("/posts/:id").unwrap().with_name("post"),
			RouteDefinition::new("/articles/:id").unwrap().with_name("article"),
		],
		&RouterSettings::default(),
	)
	.unwrap();

	let path = table
		.build_path_by_match(&params(&[("id", "3")]), &Params::new())
		.unwrap();
	assert_eq!(path, "/posts/3");
}

// Test: Context parameters from a forward match feed link generation
#[rstest]
fn test_context_round_trip() {
	let table = RouteGroup::new()
		.resources(ResourceRoutes::new("lectures").with_controller("lecture"))
		.resources(ResourceRoutes::new("students").with_controller("student"))
		.build(&RouterSettings::default())
		.unwrap();

	let matched = table.match_forward(&Method::GET, "/students/9").unwrap();
	assert_eq!(matched.route.name(), Some("students.show"));

	let context = table.context_parameters(&matched);
	assert_eq!(context, params(&[("controller", "student")]));

	let path = table
		.build_path_by_match(&params(&[("id", "4"), ("action", "edit")]), &context)
		.unwrap();
	assert_eq!(path, "/students/4/edit");
}

// Test: Wildcard parameters span slashes in both directions
#[rstest]
fn test_wildcard_round_trip() {
	let table = RouteTable::from_definitions(
		vec![
			RouteDefinition::new("/files/*path")
				.unwrap()
				.with_name("file")
				.with_methods([Method::GET]),
		],
		&RouterSettings::default(),
	)
	.unwrap();

	let matched = table.match_forward(&Method::GET, "/files/docs/guide.md").unwrap();
	assert_eq!(matched.get_param("path"), Some("docs/guide.md"));

	let path = table
		.build_path_by_name("file", &matched.params, &Params::new())
		.unwrap();
	assert_eq!(path, "/files/docs/guide.md");
}

// Test: Rendering fails loudly when a value is missing
#[rstest]
fn test_missing_value_on_render() {
	let table = RouteTable::from_definitions(
		vec![RouteDefinition::new("/users/:id").unwrap().with_name("user")],
		&RouterSettings::default(),
	)
	.unwrap();

	let err = table
		.build_path_by_name("user", &Params::new(), &Params::new())
		.unwrap_err();
	assert_eq!(err.to_string(), "No value for [id]");
}

// Test: Named template export for client-side rendering
#[rstest]
fn test_named_templates() {
	let table = RouteGroup::new()
		.resources(ResourceRoutes::new("lectures"))
		.build(&RouterSettings::default())
		.unwrap();
	let templates = table.named_templates();

	assert_eq!(templates.len(), 6);
	assert_eq!(templates["lectures.create"], "/lectures");
	assert_eq!(templates["lectures.edit"], "/lectures/${id}/edit");
	assert_eq!(templates["lectures.update"], "/lectures/${id}");
}

// Test: Invalid value patterns are reported at preparation
#[rstest]
fn test_invalid_value_pattern() {
	let err = RouteDefinition::new("/users/:id")
		.unwrap()
		.with_value_pattern("id", "(")
		.prepare()
		.unwrap_err();
	assert!(matches!(err, RouteError::InvalidValuePattern { .. }));
}
