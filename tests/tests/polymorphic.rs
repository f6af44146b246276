use tabula::{Db, Instance, Query, Reference, Value};
use tests::{fixtures, DbTest};

use pretty_assertions::assert_eq;

async fn query(db: &mut Db, query: Query) -> Vec<Instance> {
    db.query(query)
        .await
        .unwrap()
        .collect::<tabula::Result<_>>()
        .unwrap()
}

fn ids(objects: &[Instance]) -> Vec<Value> {
    objects
        .iter()
        .map(|object| object.get("Id").cloned().unwrap())
        .collect()
}

fn dog(id: i32, name: &str, color: &str) -> Instance {
    Instance::new("Dog")
        .with("Id", id)
        .with("Name", name)
        .with("Color", color)
}

fn cat(id: i32, name: &str, color: &str, lives: i32) -> Instance {
    Instance::new("Cat")
        .with("Id", id)
        .with("Name", name)
        .with("Color", color)
        .with("Lives", lives)
}

/// A plain animal, a black dog, a black cat and a white cat; kennels 10, 11
/// and 12 house animals 2, 3 and 4.
async fn seed(db: &mut Db) {
    let animals = [
        Instance::new("Animal").with("Id", 1).with("Name", "Generic"),
        dog(2, "Rex", "black"),
        cat(3, "Tom", "black", 9),
        cat(4, "Kit", "white", 7),
    ];

    for animal in &animals {
        db.insert(animal).await.unwrap();
    }

    for (kennel, resident) in [(10, 2), (11, 3), (12, 4)] {
        db.insert(
            &Instance::new("Kennel")
                .with("Id", kennel)
                .with("Resident", Reference::new("Animal", resident)),
        )
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn derived_insert_writes_every_chain_table() {
    let mut test = DbTest::new();
    let mut db = test.setup_db(fixtures::zoo()).await;
    seed(&mut db).await;

    let driver = test.driver();
    let discriminators: Vec<_> = driver
        .rows("Animal")
        .unwrap()
        .into_iter()
        .map(|row| row[1].clone())
        .collect();

    assert_eq!(
        discriminators,
        [Value::I32(1), Value::I32(2), Value::I32(3), Value::I32(3)]
    );
    assert_eq!(driver.rows("Dog").unwrap().len(), 1);
    assert_eq!(driver.rows("Cat").unwrap().len(), 2);
}

#[tokio::test]
async fn root_query_loads_only_root_columns() {
    let mut test = DbTest::new();
    let mut db = test.setup_db(fixtures::zoo()).await;
    seed(&mut db).await;

    let animals = query(&mut db, Query::new("Animal")).await;

    assert_eq!(
        animals,
        [
            Instance::new("Animal").with("Id", 1).with("Name", "Generic"),
            Instance::new("Dog").with("Id", 2).with("Name", "Rex"),
            Instance::new("Cat").with("Id", 3).with("Name", "Tom"),
            Instance::new("Cat").with("Id", 4).with("Name", "Kit"),
        ]
    );
}

#[tokio::test]
async fn derived_query_loads_the_whole_chain() {
    let mut test = DbTest::new();
    let mut db = test.setup_db(fixtures::zoo()).await;
    seed(&mut db).await;

    assert_eq!(
        query(&mut db, Query::new("Cat")).await,
        [cat(3, "Tom", "black", 9), cat(4, "Kit", "white", 7)]
    );
    assert_eq!(
        query(&mut db, Query::new("Dog")).await,
        [dog(2, "Rex", "black")]
    );
}

#[tokio::test]
async fn descendant_property_matches_any_declaring_type() {
    let mut test = DbTest::new();
    let mut db = test.setup_db(fixtures::zoo()).await;
    seed(&mut db).await;

    let black = query(&mut db, Query::new("Animal").filter("Color", "black")).await;
    assert_eq!(ids(&black), [Value::I32(2), Value::I32(3)]);

    let types: Vec<_> = black.iter().map(|animal| animal.ty.as_str()).collect();
    assert_eq!(types, ["Dog", "Cat"]);

    let seven = query(&mut db, Query::new("Animal").filter("Lives", 7)).await;
    assert_eq!(ids(&seven), [Value::I32(4)]);
}

#[tokio::test]
async fn filter_through_polymorphic_reference() {
    let mut test = DbTest::new();
    let mut db = test.setup_db(fixtures::zoo()).await;
    seed(&mut db).await;

    let black = query(
        &mut db,
        Query::new("Kennel").filter("Resident.Color", "black"),
    )
    .await;
    assert_eq!(ids(&black), [Value::I32(10), Value::I32(11)]);

    let black_cat = query(
        &mut db,
        Query::new("Kennel").filter("Resident[Cat].Color", "black"),
    )
    .await;
    assert_eq!(ids(&black_cat), [Value::I32(11)]);

    let white_dog = query(
        &mut db,
        Query::new("Kennel").filter("Resident[Dog].Color", "white"),
    )
    .await;
    assert!(white_dog.is_empty());

    let by_name = query(&mut db, Query::new("Kennel").filter("Resident.Name", "Kit")).await;
    assert_eq!(ids(&by_name), [Value::I32(12)]);
}

#[tokio::test]
async fn include_polymorphic_reference() {
    let mut test = DbTest::new();
    let mut db = test.setup_db(fixtures::zoo()).await;
    seed(&mut db).await;

    let kennels = query(&mut db, Query::new("Kennel").include("Resident")).await;
    let residents: Vec<_> = kennels
        .iter()
        .map(|kennel| kennel.get("Resident").cloned())
        .collect();

    assert_eq!(
        residents,
        [
            Some(Value::from(Instance::new("Dog").with("Id", 2).with("Name", "Rex"))),
            Some(Value::from(Instance::new("Cat").with("Id", 3).with("Name", "Tom"))),
            Some(Value::from(Instance::new("Cat").with("Id", 4).with("Name", "Kit"))),
        ]
    );
}

#[tokio::test]
async fn include_with_cast_loads_derived_columns() {
    let mut test = DbTest::new();
    let mut db = test.setup_db(fixtures::zoo()).await;
    seed(&mut db).await;

    let kennels = query(
        &mut db,
        Query::new("Kennel")
            .filter("Resident[Cat].Color", "white")
            .include("Resident[Cat]"),
    )
    .await;

    assert_eq!(
        kennels,
        [Instance::new("Kennel")
            .with("Id", 12)
            .with("Resident", cat(4, "Kit", "white", 7))]
    );
}

#[tokio::test]
async fn update_spans_chain_tables() {
    let mut test = DbTest::new();
    let mut db = test.setup_db(fixtures::zoo()).await;
    seed(&mut db).await;

    let mut log = test.log();
    log.clear();

    let renamed = cat(3, "Thomas", "grey", 8);
    db.update(&renamed, &["Name", "Color", "Lives"]).await.unwrap();

    assert_eq!(
        log.sql(),
        [
            "UPDATE [M1] SET [M1].[Name] = @p0 FROM [Animal] AS [M1] WHERE [M1].[Id] = @p1",
            "UPDATE [M2] SET [M2].[Color] = @p0, [M2].[Lives] = @p1 FROM [Cat] AS [M2] WHERE [M2].[Id] = @p2",
        ]
    );

    assert_eq!(
        query(&mut db, Query::new("Cat").filter("Id", 3)).await,
        [renamed]
    );
}
