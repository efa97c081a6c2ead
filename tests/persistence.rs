#[cfg(test)]
mod table {
    use relation_engine::persistence::{DomainType, Table, Tuple, Value};
    use relation_engine::{RelationError, tuple};

    fn _create_movie_table() -> Table {
        Table::new(
            "movie",
            "title year length genre studioName producerNo",
            "String Integer Integer String String Integer",
            "title year",
        )
        .unwrap()
    }

    #[test]
    fn table_creates_with_proper_types() {
        let table = _create_movie_table();

        assert_eq!(table.schema().len(), 6);
        assert_eq!(table.key(), &["title".to_string(), "year".to_string()]);
        assert_eq!(
            table.schema().get(1),
            Some((&"year".to_string(), &DomainType::Integer))
        );
    }

    #[test]
    #[should_panic]
    fn table_does_not_create_with_improper_types() {
        Table::new("test", "id name", "Integer Text", "id").unwrap();
    }

    #[test]
    fn table_does_not_create_with_unknown_key() {
        let table = Table::new("test", "id name", "Integer String", "code");

        assert!(matches!(table, Err(RelationError::AttributeNotFound { .. })));
    }

    #[test]
    fn table_insert_accepts_matching_tuple() {
        let mut table = _create_movie_table();

        table
            .insert(tuple!["Star_Wars", 1977, 124, "sciFi", "Fox", 12345])
            .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.index_len(), 1);
        assert_eq!(table.tuples()[0][0], Value::from("Star_Wars"));
    }

    #[test]
    fn table_insert_rejects_wrong_arity() {
        let mut table = _create_movie_table();

        let result = table.insert(tuple!["Star_Wars", 1977]);

        assert!(matches!(result, Err(RelationError::TypeMismatch { .. })));
        assert!(table.is_empty());
        assert_eq!(table.index_len(), 0);
    }

    #[test]
    fn table_insert_rejects_widened_value() {
        let mut table = _create_movie_table();

        // a real literal is not an Integer, and a Long is not an Integer either
        let real = table.insert(tuple!["Star_Wars", 1977.0, 124, "sciFi", "Fox", 12345]);
        let long = table.insert(tuple!["Star_Wars", 1977i64, 124, "sciFi", "Fox", 12345]);

        assert!(real.is_err());
        assert!(long.is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn table_insert_many_stops_at_first_rejection() {
        let mut table = Table::new("test", "id name", "Integer String", "id").unwrap();
        let rows = vec![
            tuple![1, "Jansen"],
            tuple![2, "Bonega"],
            tuple!["x", "Lorem"],
            tuple![4, "Maharashtra"],
        ];

        let result = table.insert_many(rows);

        assert!(result.is_err());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn table_insert_many_counts_rows() {
        let mut table = Table::new("test", "id name", "Integer String", "id").unwrap();
        let rows: Vec<Tuple> = vec![(1, "Jansen"), (2, "Bonega"), (3, "Maharashtra")]
            .into_iter()
            .map(|(id, name)| tuple![id, name])
            .collect();

        assert_eq!(table.insert_many(rows).unwrap(), 3);
    }

    #[test]
    fn table_duplicate_key_keeps_both_rows_and_last_index_entry() {
        let mut table = Table::new("test", "id name", "Integer String", "id").unwrap();

        table.insert(tuple![1, "Jansen"]).unwrap();
        table.insert(tuple![1, "Bonega"]).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.index_len(), 1);
        assert!(table.index_dump().contains("KeyValue(1) -> [1, Bonega]"));
    }

    #[test]
    fn table_col_finds_positions() {
        let table = _create_movie_table();

        assert_eq!(table.col("genre"), Some(3));
        assert_eq!(table.col("budget"), None);
    }

    #[test]
    fn table_prints_fixed_width_columns() {
        let mut table = Table::new("studio", "name presNo", "String Integer", "name").unwrap();
        table.insert(tuple!["Fox", 7777]).unwrap();

        let border = format!("|-{}-|", "-".repeat(30));
        let expected = format!(
            "\n Table studio\n{border}\n| {:>15}{:>15} |\n{border}\n| {:>15}{:>15} |\n{border}\n",
            "name", "presNo", "Fox", "7777"
        );

        assert_eq!(table.to_string(), expected);
    }

    #[test]
    fn table_index_dump_is_sorted_by_key() {
        let mut table = Table::new("star", "name gender", "String Character", "name").unwrap();
        table.insert(tuple!["Mark_Hamill", 'M']).unwrap();
        table.insert(tuple!["Carrie_Fisher", 'F']).unwrap();

        let dump = table.index_dump();
        let carrie = dump.find("Carrie_Fisher").unwrap();
        let mark = dump.find("Mark_Hamill").unwrap();

        assert!(dump.starts_with("\n Index for star\n"));
        assert!(carrie < mark);
    }
}

#[cfg(test)]
mod operators {
    use relation_engine::persistence::{Table, Tuple, Value};
    use relation_engine::{RelationError, key, tuple};

    fn _movie() -> Table {
        let mut movie = Table::new(
            "movie",
            "title year length genre studioName producerNo",
            "String Integer Integer String String Integer",
            "title year",
        )
        .unwrap();
        movie
            .insert_many(vec![
                tuple!["Star_Wars", 1977, 124, "sciFi", "Fox", 12345],
                tuple!["Star_Wars_2", 1980, 124, "sciFi", "Fox", 12345],
                tuple!["Rocky", 1985, 200, "action", "Universal", 12125],
                tuple!["Rambo", 1978, 100, "action", "Universal", 32355],
            ])
            .unwrap();
        movie
    }

    fn _cinema() -> Table {
        let mut cinema = Table::new(
            "cinema",
            "title year length genre studioName producerNo",
            "String Integer Integer String String Integer",
            "title year",
        )
        .unwrap();
        cinema
            .insert_many(vec![
                tuple!["Rocky", 1985, 200, "action", "Universal", 12125],
                tuple!["Rambo", 1978, 100, "action", "Universal", 32355],
                tuple!["Galaxy_Quest", 1999, 104, "comedy", "DreamWorks", 67890],
            ])
            .unwrap();
        cinema
    }

    fn _studio() -> Table {
        let mut studio =
            Table::new("studio", "name address presNo", "String String Integer", "name").unwrap();
        studio
            .insert_many(vec![
                tuple!["Fox", "Los_Angeles", 7777],
                tuple!["Universal", "Universal_City", 8888],
                tuple!["DreamWorks", "Universal_City", 9999],
            ])
            .unwrap();
        studio
    }

    fn _letters(name: &str, letters: &[&str]) -> Table {
        let mut table = Table::new(name, "letter", "String", "letter").unwrap();
        for letter in letters {
            table.insert(tuple![*letter]).unwrap();
        }
        table
    }

    #[test]
    fn project_keeps_requested_columns_in_order() {
        let mut movie = Table::new(
            "movie",
            "title year length genre studioName producerNo",
            "String Integer Integer String String Integer",
            "title year",
        )
        .unwrap();
        movie
            .insert(tuple!["Star_Wars", 1977, 124, "sciFi", "Fox", 12345])
            .unwrap();
        movie
            .insert(tuple!["Star_Wars_2", 1980, 124, "sciFi", "Fox", 12345])
            .unwrap();

        let projected = movie.project_str("title year").unwrap();

        assert_eq!(
            projected.tuples(),
            &[tuple!["Star_Wars", 1977], tuple!["Star_Wars_2", 1980]]
        );
        assert_eq!(projected.key(), &["title".to_string(), "year".to_string()]);
        assert_ne!(projected.name(), movie.name());
        assert!(projected.name().starts_with("movie"));
    }

    #[test]
    fn project_reorders_columns() {
        let projected = _movie().project(&["year", "title"]).unwrap();

        assert_eq!(projected.tuples()[0], tuple![1977, "Star_Wars"]);
        assert_eq!(projected.schema().position("title"), Some(1));
    }

    #[test]
    fn project_dropping_key_promotes_projected_attributes() {
        let projected = _movie().project_str("genre studioName").unwrap();

        assert_eq!(
            projected.key(),
            &["genre".to_string(), "studioName".to_string()]
        );
        // no deduplication: one output row per input row
        assert_eq!(projected.len(), 4);
        assert_eq!(projected.index_len(), 2);
        assert!(projected.tuples().iter().all(|t| t.len() == 2));
    }

    #[test]
    fn project_unknown_attribute_fails() {
        let result = _movie().project_str("title budget");

        assert!(matches!(
            result,
            Err(RelationError::AttributeNotFound { attribute, .. }) if attribute == "budget"
        ));
    }

    #[test]
    fn select_predicate_keeps_matching_rows() {
        let movie = _movie();
        let title = movie.col("title").unwrap();

        let selected = movie.select(|t| t[title] == Value::from("Star_Wars"));

        assert_eq!(
            selected.tuples(),
            &[tuple!["Star_Wars", 1977, 124, "sciFi", "Fox", 12345]]
        );
        assert_eq!(selected.schema(), movie.schema());
        assert_eq!(selected.index_len(), 1);
    }

    #[test]
    fn select_predicate_preserves_order() {
        let movie = _movie();
        let length = movie.col("length").unwrap();

        let selected = movie.select(|t| t[length] >= Value::from(124));

        let titles: Vec<&str> = selected.tuples().iter().map(|t| t[0].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["Star_Wars", "Star_Wars_2", "Rocky"]);
    }

    #[test]
    fn select_predicate_can_return_empty() {
        let selected = _movie().select(|_| false);

        assert!(selected.is_empty());
        assert_eq!(selected.schema().len(), 6);
    }

    #[test]
    fn select_key_uses_index() {
        let movie = _movie();

        let selected = movie.select_key(&key!["Rocky", 1985]);

        assert_eq!(
            selected.tuples(),
            &[tuple!["Rocky", 1985, 200, "action", "Universal", 12125]]
        );
        assert_eq!(selected.key(), movie.key());
    }

    #[test]
    fn select_key_missing_returns_empty() {
        let selected = _movie().select_key(&key!["Rocky", 1999]);

        assert!(selected.is_empty());
    }

    #[test]
    fn select_key_sees_only_latest_duplicate() {
        let mut table = Table::new("test", "id name", "Integer String", "id").unwrap();
        table.insert(tuple![1, "Jansen"]).unwrap();
        table.insert(tuple![1, "Bonega"]).unwrap();

        let by_key = table.select_key(&key![1]);
        let by_scan = table.select(|t| t[0] == Value::from(1));

        assert_eq!(by_key.tuples(), &[tuple![1, "Bonega"]]);
        assert_eq!(by_scan.len(), 2);
    }

    #[test]
    fn union_appends_rows_missing_from_left() {
        let first = _letters("first", &["A", "B"]);
        let second = _letters("second", &["B", "C"]);

        let union = first.union(&second).unwrap();

        assert_eq!(union.tuples(), &[tuple!["A"], tuple!["B"], tuple!["C"]]);
        assert_eq!(union.key(), first.key());
    }

    #[test]
    fn union_keeps_duplicates_within_right() {
        let first = _letters("first", &["A"]);
        let mut second = Table::new("second", "letter", "String", "letter").unwrap();
        second.insert(tuple!["C"]).unwrap();
        second.insert(tuple!["C"]).unwrap();

        let union = first.union(&second).unwrap();

        assert_eq!(union.len(), 3);
    }

    #[test]
    fn union_of_movies_and_cinema() {
        let union = _movie().union(&_cinema()).unwrap();

        assert_eq!(union.len(), 5);
        assert_eq!(union.tuples()[4][0], Value::from("Galaxy_Quest"));
    }

    #[test]
    fn minus_removes_rows_present_on_right() {
        let first = _letters("first", &["A", "B"]);
        let second = _letters("second", &["B", "C"]);

        let difference = first.minus(&second).unwrap();

        assert_eq!(difference.tuples(), &[tuple!["A"]]);
    }

    fn _distinct(table: &Table) -> Vec<Tuple> {
        let mut rows = table.tuples().to_vec();
        rows.sort();
        rows.dedup();
        rows
    }

    #[test]
    fn union_is_commutative_on_distinct_rows() {
        let movie = _movie();
        let cinema = _cinema();

        let left = movie.union(&cinema).unwrap();
        let right = cinema.union(&movie).unwrap();

        assert_eq!(_distinct(&left), _distinct(&right));
        assert_eq!(_distinct(&left).len(), 5);
    }

    #[test]
    fn minus_then_union_with_overlap_rebuilds_left() {
        let movie = _movie();
        let cinema = _cinema();

        let only_movie = movie.minus(&cinema).unwrap();
        let overlap = movie.select(|t| cinema.tuples().contains(t));
        let rebuilt = only_movie.union(&overlap).unwrap();

        assert_eq!(only_movie.len(), 2);
        assert!(only_movie.tuples().iter().all(|t| !cinema.tuples().contains(t)));
        assert_eq!(_distinct(&rebuilt), _distinct(&movie));
    }

    #[test]
    fn minus_with_itself_is_empty() {
        let movie = _movie();

        assert!(movie.minus(&movie).unwrap().is_empty());
    }

    #[test]
    fn union_and_minus_ignore_attribute_names() {
        let first = _letters("first", &["A"]);
        let other = Table::new("other", "code", "String", "code").unwrap();

        assert!(first.union(&other).is_ok());
        assert!(first.minus(&other).is_ok());
    }

    #[test]
    fn incompatible_arity_fails() {
        let result = _movie().union(&_studio());

        assert!(matches!(result, Err(RelationError::Compatibility { .. })));
    }

    #[test]
    fn incompatible_domain_fails() {
        let letters = _letters("letters", &["A"]);
        let numbers = Table::new("numbers", "letter", "Character", "letter").unwrap();

        assert!(matches!(
            letters.minus(&numbers),
            Err(RelationError::Compatibility { .. })
        ));
        assert!(matches!(
            letters.union(&numbers),
            Err(RelationError::Compatibility { .. })
        ));
    }

    #[test]
    fn operators_leave_inputs_untouched() {
        let movie = _movie();
        let before = movie.clone();

        let _ = movie.project_str("title").unwrap();
        let _ = movie.select(|_| true);
        let _ = movie.union(&_cinema()).unwrap();
        let _ = movie.minus(&_cinema()).unwrap();
        let _ = movie.union(&_studio());

        assert_eq!(movie, before);
        assert_eq!(movie.name(), "movie");
        assert_eq!(movie.index_len(), 4);
    }

    #[test]
    fn join_pairs_matching_rows() {
        let mut movie = _movie();
        movie
            .insert(tuple!["Unknown", 2001, 90, "drama", "Nowhere", 1])
            .unwrap();
        let studio = _studio();

        let joined = movie.join_str("studioName", "name", &studio).unwrap();

        assert_eq!(joined.len(), 4);
        assert_eq!(joined.schema().len(), 9);
        assert_eq!(joined.key(), movie.key());
        for row in joined.tuples() {
            assert_eq!(row[4], row[6]);
        }
        assert_eq!(
            joined.tuples()[0],
            tuple![
                "Star_Wars",
                1977,
                124,
                "sciFi",
                "Fox",
                12345,
                "Fox",
                "Los_Angeles",
                7777
            ]
        );
    }

    #[test]
    fn join_row_count_matches_pair_count() {
        let movie = _movie();
        let cinema = _cinema();

        let joined = movie.join(&["genre"], &["genre"], &cinema).unwrap();

        // 2 action movies x 2 action cinema rows, no sciFi in cinema
        assert_eq!(joined.len(), 4);
    }

    #[test]
    fn join_renames_colliding_attributes() {
        let star = Table::new("star", "name address", "String String", "name").unwrap();
        let exec = Table::new("exec", "name address fee", "String String Double", "name").unwrap();

        let joined = star.join_str("name", "name", &exec).unwrap();
        let names: Vec<&String> = joined.schema().names().collect();

        assert_eq!(names, vec!["name", "address", "name2", "address2", "fee"]);
    }

    #[test]
    fn join_arity_mismatch_fails() {
        let result = _movie().join(&["title", "year"], &["name"], &_studio());

        assert!(matches!(
            result,
            Err(RelationError::JoinArity { left: 2, right: 1 })
        ));
    }

    #[test]
    fn join_unknown_attribute_fails() {
        let result = _movie().join_str("studio", "name", &_studio());

        assert!(matches!(result, Err(RelationError::AttributeNotFound { .. })));
    }
}
