use tabula::{engine::Segment, Planner, QueryPlan, Schema};
use tests::{assert_err, fixtures};

use pretty_assertions::assert_eq;

fn schema(builder: tabula::db::Builder) -> Schema {
    builder.build_schema().unwrap()
}

fn query(
    schema: &Schema,
    ty: &str,
    filters: &[&str],
    includes: &[&str],
) -> tabula::Result<QueryPlan> {
    Planner::new(schema).query(ty, filters, includes)
}

fn sql(schema: &Schema, ty: &str, filters: &[&str], includes: &[&str]) -> String {
    query(schema, ty, filters, includes).unwrap().sql
}

#[test]
fn filter_on_root_table() {
    let schema = schema(fixtures::base_classes());

    assert_eq!(
        sql(&schema, "BaseClass", &["Prop1"], &[]),
        "SELECT [M1].* FROM [BaseClass] AS [M1] WHERE [M1].[Prop1] = @p0"
    );
}

#[test]
fn derived_type_joins_its_chain() {
    let schema = schema(fixtures::base_classes());

    assert_eq!(
        sql(&schema, "DerivedClass", &["Prop1"], &[]),
        "SELECT [M1].*, [T1].* FROM [BaseClass] AS [M1] \
         INNER JOIN [DerivedClass] AS [T1] ON [M1].[ObjectId] = [T1].[ObjectId] \
         WHERE [M1].[Prop1] = @p0"
    );
}

#[test]
fn single_member_hierarchy_selects_one_table() {
    let schema = schema(fixtures::shop());
    let plan = query(&schema, "Customer", &["Name"], &[]).unwrap();

    assert_eq!(
        plan.sql,
        "SELECT [M1].* FROM [Customer] AS [M1] WHERE [M1].[Name] = @p0"
    );
    assert!(!plan.sql.contains("_dscr"));

    let [Segment::Type { tables, .. }] = &plan.shape.segments[..] else {
        panic!("unexpected shape {:?}", plan.shape);
    };
    assert_eq!(tables.len(), 1);
}

#[test]
fn filter_on_identity() {
    let schema = schema(fixtures::base_classes());

    assert_eq!(
        sql(&schema, "DerivedClass", &["ObjectId"], &[]),
        "SELECT [M1].*, [T1].* FROM [BaseClass] AS [M1] \
         INNER JOIN [DerivedClass] AS [T1] ON [M1].[ObjectId] = [T1].[ObjectId] \
         WHERE [M1].[ObjectId] = @p0"
    );
}

#[test]
fn filters_are_and_combined_with_one_param_each() {
    let schema = schema(fixtures::shop());
    let plan = query(&schema, "SpecialOrder", &["Note", "Priority"], &[]).unwrap();

    assert_eq!(
        plan.sql,
        "SELECT [M1].*, [T1].* FROM [Order] AS [M1] \
         INNER JOIN [SpecialOrder] AS [T1] ON [M1].[Id] = [T1].[Id] \
         WHERE [M1].[Note] = @p0 AND [T1].[Priority] = @p1"
    );

    let params: Vec<_> = plan
        .params
        .iter()
        .map(|param| (param.name.as_str(), param.path.as_str()))
        .collect();
    assert_eq!(params, [("@p0", "Note"), ("@p1", "Priority")]);
}

#[test]
fn filter_through_reference() {
    let schema = schema(fixtures::shop());

    assert_eq!(
        sql(&schema, "Order", &["Customer.Name"], &[]),
        "SELECT [M1].* FROM [Order] AS [M1] \
         INNER JOIN [Customer] AS [M1B0T1] ON [M1].[Customer] = [M1B0T1].[Id] \
         WHERE [M1B0T1].[Name] = @p0"
    );
}

#[test]
fn filter_on_reference_compares_foreign_key() {
    let schema = schema(fixtures::shop());

    assert_eq!(
        sql(&schema, "Order", &["Customer"], &[]),
        "SELECT [M1].* FROM [Order] AS [M1] WHERE [M1].[Customer] = @p0"
    );
}

#[test]
fn filter_through_collection() {
    let schema = schema(fixtures::shop());

    assert_eq!(
        sql(&schema, "Order", &["Lines.Sku"], &[]),
        "SELECT [M1].* FROM [Order] AS [M1] \
         INNER JOIN [Line] AS [M1B0T1] ON [M1].[Id] = [M1B0T1].[Order_Lines] \
         WHERE [M1B0T1].[Sku] = @p0"
    );
}

#[test]
fn filter_on_primitive_list_compares_value() {
    let schema = schema(fixtures::shop());

    assert_eq!(
        sql(&schema, "Order", &["Tags"], &[]),
        "SELECT [M1].* FROM [Order] AS [M1] \
         INNER JOIN [Order_Tags] AS [M1B0T1] ON [M1].[Id] = [M1B0T1].[ParentId] \
         WHERE [M1B0T1].[Value] = @p0"
    );
}

#[test]
fn filter_on_descendant_property_branches() {
    let schema = schema(fixtures::zoo());

    assert_eq!(
        sql(&schema, "Animal", &["Color"], &[]),
        "SELECT [M1].* FROM [Animal] AS [M1] \
         LEFT OUTER JOIN [Dog] AS [M1B1T1] ON [M1].[Id] = [M1B1T1].[Id] \
         LEFT OUTER JOIN [Cat] AS [M1B2T1] ON [M1].[Id] = [M1B2T1].[Id] \
         WHERE ([M1B1T1].[Color] = @p0 OR [M1B2T1].[Color] = @p0)"
    );
}

#[test]
fn nearest_descendant_search_stops_at_first_depth() {
    let schema = schema(fixtures::zoo());

    assert_eq!(
        sql(&schema, "Animal", &["Lives"], &[]),
        "SELECT [M1].* FROM [Animal] AS [M1] \
         LEFT OUTER JOIN [Cat] AS [M1B1T1] ON [M1].[Id] = [M1B1T1].[Id] \
         WHERE [M1B1T1].[Lives] = @p0"
    );
}

#[test]
fn filter_branches_beneath_navigation() {
    let schema = schema(fixtures::zoo());

    assert_eq!(
        sql(&schema, "Kennel", &["Resident.Color"], &[]),
        "SELECT [M1].* FROM [Kennel] AS [M1] \
         INNER JOIN [Animal] AS [M1B0T1] ON [M1].[Resident] = [M1B0T1].[Id] \
         LEFT OUTER JOIN [Dog] AS [M1B0T1B1T1] ON [M1B0T1].[Id] = [M1B0T1B1T1].[Id] \
         LEFT OUTER JOIN [Cat] AS [M1B0T1B2T1] ON [M1B0T1].[Id] = [M1B0T1B2T1].[Id] \
         WHERE ([M1B0T1B1T1].[Color] = @p0 OR [M1B0T1B2T1].[Color] = @p0)"
    );
}

#[test]
fn cast_bypasses_descendant_search() {
    let schema = schema(fixtures::zoo());

    assert_eq!(
        sql(&schema, "Kennel", &["Resident[Cat].Color"], &[]),
        "SELECT [M1].* FROM [Kennel] AS [M1] \
         INNER JOIN [Animal] AS [M1B0T1] ON [M1].[Resident] = [M1B0T1].[Id] \
         INNER JOIN [Cat] AS [M1B0T2] ON [M1B0T1].[Id] = [M1B0T2].[Id] \
         WHERE [M1B0T2].[Color] = @p0"
    );
}

#[test]
fn include_reference() {
    let schema = schema(fixtures::shop());
    let plan = query(&schema, "Order", &[], &["Customer"]).unwrap();

    assert_eq!(
        plan.sql,
        "SELECT [M1].*, [S1].* FROM [Order] AS [M1] \
         LEFT OUTER JOIN [Customer] AS [S1] ON [M1].[Customer] = [S1].[Id]"
    );

    let order = schema.ty("Order").unwrap();
    let customer = schema.ty("Customer").unwrap();

    assert_eq!(
        plan.shape.segments[1],
        Segment::SubType {
            ty: customer.id,
            tables: vec![customer.table],
            collecting_ty: order.id,
            property: "Customer".to_string(),
            many: false,
        }
    );
}

#[test]
fn include_collection() {
    let schema = schema(fixtures::shop());
    let plan = query(&schema, "Order", &[], &["Lines"]).unwrap();

    assert_eq!(
        plan.sql,
        "SELECT [M1].*, [S1].* FROM [Order] AS [M1] \
         LEFT OUTER JOIN [Line] AS [S1] ON [M1].[Id] = [S1].[Order_Lines]"
    );

    let Segment::SubType { many, property, .. } = &plan.shape.segments[1] else {
        panic!("unexpected shape {:?}", plan.shape);
    };
    assert!(*many);
    assert_eq!(property, "Lines");
}

#[test]
fn include_primitive_list_is_an_expansion() {
    let schema = schema(fixtures::int_arr());
    let plan = query(&schema, "ClassWithIntArr", &[], &["Arr"]).unwrap();

    assert_eq!(
        plan.sql,
        "SELECT [M1].*, [S1].* FROM [ClassWithIntArr] AS [M1] \
         LEFT OUTER JOIN [ClassWithIntArr_Arr] AS [S1] ON [M1].[ObjectId] = [S1].[ParentId]"
    );

    let Segment::Expansion { maintain_order, .. } = &plan.shape.segments[1] else {
        panic!("unexpected shape {:?}", plan.shape);
    };
    assert!(*maintain_order);
}

#[test]
fn include_with_cast_joins_cast_chain() {
    let schema = schema(fixtures::zoo());
    let plan = query(&schema, "Kennel", &[], &["Resident[Cat]"]).unwrap();

    assert_eq!(
        plan.sql,
        "SELECT [M1].*, [S1].*, [S2].* FROM [Kennel] AS [M1] \
         LEFT OUTER JOIN [Animal] AS [S1] ON [M1].[Resident] = [S1].[Id] \
         INNER JOIN [Cat] AS [S2] ON [S1].[Id] = [S2].[Id]"
    );

    let cat = schema.ty("Cat").unwrap();
    let Segment::SubType { ty, tables, .. } = &plan.shape.segments[1] else {
        panic!("unexpected shape {:?}", plan.shape);
    };
    assert_eq!(*ty, cat.id);
    assert_eq!(tables, &cat.tables);
}

#[test]
fn include_and_filter_share_one_statement() {
    let schema = schema(fixtures::shop());

    assert_eq!(
        sql(&schema, "Order", &["Customer.Name"], &["Lines"]),
        "SELECT [M1].*, [S1].* FROM [Order] AS [M1] \
         LEFT OUTER JOIN [Line] AS [S1] ON [M1].[Id] = [S1].[Order_Lines] \
         INNER JOIN [Customer] AS [M1B0T1] ON [M1].[Customer] = [M1B0T1].[Id] \
         WHERE [M1B0T1].[Name] = @p0"
    );
}

#[test]
fn include_paths_sharing_a_prefix_reuse_joins() {
    let schema = schema(fixtures::zoo());
    let once = query(&schema, "Kennel", &[], &["Resident"]).unwrap();
    let twice = query(&schema, "Kennel", &[], &["Resident", "Resident"]).unwrap();

    assert_eq!(once.sql, twice.sql);
    assert_eq!(once.shape, twice.shape);
}

#[test]
fn sibling_includes_are_not_supported() {
    let schema = schema(fixtures::shop());

    let err = assert_err!(query(&schema, "Order", &[], &["Lines", "Tags"]));
    assert!(err.is_not_supported());
}

#[test]
fn unordered_list_include_with_fanning_filter_is_not_supported() {
    let schema = schema(fixtures::shop());

    for filter in ["Lines.Sku", "Tags"] {
        let err = assert_err!(query(&schema, "Order", &[filter], &["Tags"]));
        assert!(err.is_not_supported(), "{filter}: {err}");
    }

    // Reference hops do not repeat rows, and ordered lists fold by index
    assert!(query(&schema, "Order", &["Customer.Name"], &["Tags"]).is_ok());
    assert!(query(&schema, "Order", &["Lines.Sku"], &["Customer"]).is_ok());

    let schema = self::schema(fixtures::int_arr());
    assert!(query(&schema, "ClassWithIntArr", &["Arr"], &["Arr"]).is_ok());
}

#[test]
fn include_past_primitive_list_is_not_supported() {
    let schema = schema(fixtures::shop());

    let err = assert_err!(query(&schema, "Order", &[], &["Tags.Value"]));
    assert!(err.is_not_supported());
}

#[test]
fn unknown_paths_are_configuration_errors() {
    let schema = schema(fixtures::zoo());

    let check = |filters: &[&str], includes: &[&str]| {
        let err = assert_err!(
            query(&schema, "Kennel", filters, includes),
            "filters={filters:?} includes={includes:?}"
        );
        assert!(err.is_configuration(), "{err}");
    };

    check(&["Missing"], &[]);
    check(&["Resident.Missing"], &[]);
    check(&["Resident[Kennel].Name"], &[]);
    check(&["Id.Length"], &[]);
    check(&["Id[Dog]"], &[]);
    check(&["Resident.Name[Dog]"], &[]);
    check(&[], &["Id"]);
    check(&[], &["Missing"]);
    check(&[], &["Resident.Color"]);
}

#[test]
fn filter_on_collection_is_a_configuration_error() {
    let schema = schema(fixtures::shop());

    let err = assert_err!(query(&schema, "Order", &["Lines"], &[]));
    assert!(err.is_configuration());

    let err = assert_err!(query(&schema, "Order", &["Tags.Value"], &[]));
    assert!(err.is_configuration());
}

#[test]
fn unknown_type_is_a_configuration_error() {
    let schema = schema(fixtures::shop());

    let err = assert_err!(query(&schema, "Invoice", &[], &[]));
    assert!(err.is_configuration());
}
