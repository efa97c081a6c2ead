//! The movie database demonstration.
//!
//! See "Database Systems: The Complete Book", second edition, page 26 for
//! the schema.

use crate::config::StoreConfig;
use crate::error::RelationError;
use crate::persistence::{Table, Value};
use crate::{key, tuple};

/// The six tables of the movie database, populated.
pub struct MovieDatabase {
    pub movie: Table,
    pub cinema: Table,
    pub movie_star: Table,
    pub stars_in: Table,
    pub movie_exec: Table,
    pub studio: Table,
}

impl MovieDatabase {
    pub fn build() -> Result<MovieDatabase, RelationError> {
        let mut movie = Table::new(
            "movie",
            "title year length genre studioName producerNo",
            "String Integer Integer String String Integer",
            "title year",
        )?;
        let mut cinema = Table::new(
            "cinema",
            "title year length genre studioName producerNo",
            "String Integer Integer String String Integer",
            "title year",
        )?;
        let mut movie_star = Table::new(
            "movieStar",
            "name address gender birthdate",
            "String String Character String",
            "name",
        )?;
        let mut stars_in = Table::new(
            "starsIn",
            "movieTitle movieYear starName",
            "String Integer String",
            "movieTitle movieYear starName",
        )?;
        let mut movie_exec = Table::new(
            "movieExec",
            "certNo name address fee",
            "Integer String String Double",
            "certNo",
        )?;
        let mut studio = Table::new(
            "studio",
            "name address presNo",
            "String String Integer",
            "name",
        )?;

        let film2 = tuple!["Rocky", 1985, 200, "action", "Universal", 12125];
        let film3 = tuple!["Rambo", 1978, 100, "action", "Universal", 32355];

        movie.insert_many(vec![
            tuple!["Star_Wars", 1977, 124, "sciFi", "Fox", 12345],
            tuple!["Star_Wars_2", 1980, 124, "sciFi", "Fox", 12345],
            film2.clone(),
            film3.clone(),
        ])?;
        cinema.insert_many(vec![
            film2,
            film3,
            tuple!["Galaxy_Quest", 1999, 104, "comedy", "DreamWorks", 67890],
        ])?;
        movie_star.insert_many(vec![
            tuple!["Carrie_Fisher", "Hollywood", 'F', "9/9/99"],
            tuple!["Mark_Hamill", "Brentwood", 'M', "8/8/88"],
            tuple!["Harrison_Ford", "Beverly_Hills", 'M', "7/7/77"],
        ])?;
        stars_in.insert(tuple!["Star_Wars", 1977, "Carrie_Fisher"])?;
        movie_exec.insert(tuple![9999, "S_Spielberg", "Hollywood", 10000.00])?;
        studio.insert_many(vec![
            tuple!["Fox", "Los_Angeles", 7777],
            tuple!["Universal", "Universal_City", 8888],
            tuple!["DreamWorks", "Universal_City", 9999],
        ])?;

        Ok(MovieDatabase {
            movie,
            cinema,
            movie_star,
            stars_in,
            movie_exec,
            studio,
        })
    }

    pub fn tables(&self) -> [&Table; 6] {
        [
            &self.movie,
            &self.cinema,
            &self.movie_star,
            &self.stars_in,
            &self.movie_exec,
            &self.studio,
        ]
    }
}

pub fn run(store: &StoreConfig) -> Result<(), RelationError> {
    //! Build, print and save every table, then print the result of each
    //! operator.

    let db = MovieDatabase::build()?;

    for table in db.tables() {
        table.print();
        table.save(store)?;
    }

    db.movie_star.print_index();

    let movie = &db.movie;

    movie.project_str("title year")?.print();

    let (title, year) = (movie.col("title"), movie.col("year"));
    movie
        .select(|t| {
            title.is_some_and(|c| t[c] == Value::from("Star_Wars"))
                && year.is_some_and(|c| t[c] == Value::from(1977))
        })
        .print();

    db.movie_star.select_key(&key!["Harrison_Ford"]).print();

    movie.union(&db.cinema)?.print();
    movie.minus(&db.cinema)?.print();
    movie.join_str("studioName", "name", &db.studio)?.print();

    Ok(())
}
