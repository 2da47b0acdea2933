use chrono::NaiveDate;
use scopie::prelude::*;
use serial_test::serial;

#[derive(Debug, Clone, Default, PartialEq)]
struct Listing {
    filters: Vec<String>,
}

impl Listing {
    fn with(&self, filter: String) -> Self {
        let mut filters = self.filters.clone();
        filters.push(filter);
        Self { filters }
    }
}

impl ScopeTarget for Listing {
    fn operations(ops: &mut OperationTable<Self>) {
        ops.chain("featured", |l, v| l.with(format!("featured={v}")))
            .chain("by_degree", |l, v| l.with(format!("degree={v}")))
            .chain("published_after", |l, v| l.with(format!("after={v}")))
            .chain("min_rating", |l, v| l.with(format!("rating>={v}")));
    }
}

struct GraduatesScopie;

impl Scopie for GraduatesScopie {
    type Target = Listing;

    fn declare(scopes: &mut ScopeRegistry) {
        scopes.declare(["featured"], ScopeOptions::builder().type_tag(ScopeType::Boolean).build());
        scopes.declare(["by_degree"], ScopeOptions::builder().default_value("asc").except(["export"]).build());
        scopes.declare(
            ["published_after"],
            ScopeOptions::builder().type_tag(ScopeType::Date).namespace("filter").build(),
        );
    }

    fn overrides(table: &mut OverrideTable<Self, Listing>) {
        table.register("featured", |_, listing, value, _| {
            if *value == Param::Bool(true) {
                Ok(ScopeOutcome::Replace(listing.with("featured only".to_owned())))
            } else {
                Ok(ScopeOutcome::Signal(false))
            }
        });
    }
}

#[test]
#[serial]
fn defaults_apply_without_input() {
    let scopes = scopie::current_scopes(&Params::new(), None, &GraduatesScopie).unwrap();
    assert_eq!(scopes.names().collect::<Vec<_>>(), ["by_degree"]);

    let listing = scopie::apply_scopes(Listing::default(), &Params::new(), None, &GraduatesScopie).unwrap();
    assert_eq!(listing.filters, ["degree=asc"]);
}

#[test]
#[serial]
fn except_hides_defaults_for_that_action() {
    let scopes = scopie::current_scopes(&Params::new(), Some("export"), &GraduatesScopie).unwrap();
    assert!(scopes.is_empty());
}

#[test]
#[serial]
fn overrides_and_namespaces_combine() {
    let params = Params::new()
        .with("featured", "true")
        .with("filter", Params::new().with("published_after", "2016-06-01"));

    let listing = scopie::apply_scopes(Listing::default(), &params, Some("index"), &GraduatesScopie).unwrap();
    assert_eq!(listing.filters, ["featured only", "degree=asc", "after=2016-06-01"]);

    let scopes = scopie::current_scopes(&params, Some("index"), &GraduatesScopie).unwrap();
    let date = NaiveDate::from_ymd_opt(2016, 6, 1).unwrap();
    assert_eq!(scopes.get("published_after"), Some(&Param::Date(date)));
}

#[test]
#[serial]
fn signal_from_override_keeps_listing() {
    let params = Params::new().with("featured", "false");
    let listing = scopie::apply_scopes(Listing::default(), &params, None, &GraduatesScopie).unwrap();
    assert_eq!(listing.filters, ["degree=asc"]);
}

#[test]
#[serial]
fn malformed_date_surfaces_as_format_error() {
    let params = Params::new().with("filter", Params::new().with("published_after", "someday"));
    let err = scopie::apply_scopes(Listing::default(), &params, None, &GraduatesScopie).unwrap_err();
    assert!(matches!(err, ScopeError::Format { .. }));
    assert_eq!(err.context_hint(), Some("coercing scope 'published_after'"));
    assert_eq!(err.scope(), Some("published_after"));
}

#[test]
#[serial]
fn base_owner_is_identity_until_declared() {
    scopie::reset::<Base<Listing>>();
    let params = Params::new().with("min_rating", "4.5");

    let listing = scopie::apply_scopes_with_base(Listing::default(), &params, None).unwrap();
    assert_eq!(listing, Listing::default());

    scopie::declare::<Base<Listing>, _, _>(["min_rating"], ScopeOptions::builder().type_tag(ScopeType::Float).build());
    let listing = scopie::apply_scopes_with_base(Listing::default(), &params, None).unwrap();
    assert_eq!(listing.filters, ["rating>=4.5"]);

    let scopes = scopie::current_scopes_with_base::<Listing>(&params, None).unwrap();
    assert_eq!(serde_json::to_value(&scopes).unwrap(), serde_json::json!({ "min_rating": 4.5 }));
    assert_eq!(scopie::definitions_for::<Base<Listing>>().len(), 1);

    scopie::reset::<Base<Listing>>();
    assert!(scopie::definitions_for::<Base<Listing>>().is_empty());
}
