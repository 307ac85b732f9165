// ABOUTME: Integration tests for the SQLite store and its resource managers
// ABOUTME: Covers persistence, transactional writes, write contention, cascades and large reads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use fitsocial_server::{
    config::DatabaseUrl,
    database::{Database, LikeToggle},
    errors::ErrorCode,
    models::{Comment, NewExercise, Post, Workout, WorkoutFields, WorkoutLevel},
};
use uuid::Uuid;

fn sample_workout(user_id: Uuid, title: &str) -> Workout {
    let mut workout = Workout::new(
        user_id,
        WorkoutFields {
            title: title.to_owned(),
            description: String::new(),
            duration: 30,
            calories: 250,
            level: WorkoutLevel::Beginner,
        },
    );
    workout.exercises = vec![
        NewExercise {
            name: "Push-up".to_owned(),
            sets: 3,
            reps: 15,
            weight: None,
        },
        NewExercise {
            name: "Row".to_owned(),
            sets: 3,
            reps: 10,
            weight: Some(40.0),
        },
    ]
    .into_iter()
    .map(|e| e.into_exercise(workout.id))
    .collect();
    workout
}

async fn memory_database() -> Database {
    common::init_test_logging();
    Database::new(&DatabaseUrl::Memory).await.unwrap()
}

#[tokio::test]
async fn test_file_database_persists_across_reopen() {
    common::init_test_logging();
    let temp_dir = tempfile::tempdir().unwrap();
    let url = DatabaseUrl::SQLite {
        path: temp_dir.path().join("nested").join("fitsocial.db"),
    };
    let user_id = Uuid::new_v4();
    let workout = sample_workout(user_id, "Persisted");

    {
        let database = Database::new(&url).await.unwrap();
        database.workouts().create_workout(&workout).await.unwrap();
        database.pool().close().await;
    }

    let database = Database::new(&url).await.unwrap();
    let loaded = database
        .workouts()
        .get_workout(user_id, workout.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded, workout);
}

#[tokio::test]
async fn test_exercises_keep_insertion_order() {
    let database = memory_database().await;
    let user_id = Uuid::new_v4();
    let workout = sample_workout(user_id, "Upper Body");
    database.workouts().create_workout(&workout).await.unwrap();

    let listed = database.workouts().list_workouts(user_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    let names: Vec<&str> = listed[0].exercises.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Push-up", "Row"]);
    assert_eq!(listed[0].exercises[1].weight, Some(40.0));
}

#[tokio::test]
async fn test_failed_workout_insert_leaves_nothing_behind() {
    let database = memory_database().await;
    let user_id = Uuid::new_v4();
    let mut workout = sample_workout(user_id, "Duplicate Exercises");
    let duplicate_id = workout.exercises[0].id;
    workout.exercises[1].id = duplicate_id;

    let err = database.workouts().create_workout(&workout).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::DatabaseError);

    assert!(database.workouts().list_workouts(user_id).await.unwrap().is_empty());
    let (exercises,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exercises")
        .fetch_one(database.pool())
        .await
        .unwrap();
    assert_eq!(exercises, 0);
}

#[tokio::test]
async fn test_update_of_foreign_workout_changes_nothing() {
    let database = memory_database().await;
    let owner = Uuid::new_v4();
    let workout = sample_workout(owner, "Owned");
    database.workouts().create_workout(&workout).await.unwrap();

    let replacement = sample_workout(owner, "Hijacked");
    let fields = WorkoutFields {
        title: "Hijacked".to_owned(),
        description: String::new(),
        duration: 1,
        calories: 1,
        level: WorkoutLevel::Advanced,
    };
    let result = database
        .workouts()
        .update_workout(Uuid::new_v4(), workout.id, &fields, &replacement.exercises)
        .await
        .unwrap();
    assert!(result.is_none());

    let loaded = database.workouts().get_workout(owner, workout.id).await.unwrap().unwrap();
    assert_eq!(loaded.title, "Owned");
    assert_eq!(loaded.exercises, workout.exercises);
}

#[tokio::test]
async fn test_like_toggle_is_unique_per_user() {
    let database = memory_database().await;
    let social = database.social();
    let author = Uuid::new_v4();
    let post = Post::new(author, "Hello".to_owned(), None);
    social.create_post(&post).await.unwrap();

    let fan = Uuid::new_v4();
    assert_eq!(social.toggle_like(post.id, fan).await.unwrap(), LikeToggle::Liked);
    assert_eq!(social.toggle_like(post.id, author).await.unwrap(), LikeToggle::Liked);
    assert_eq!(social.toggle_like(post.id, fan).await.unwrap(), LikeToggle::Unliked);

    let likes = social.list_likes(post.id).await.unwrap();
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0].user_id, author);

    let err = social.toggle_like(Uuid::new_v4(), fan).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_deleting_post_cascades_likes_and_comments() {
    let database = memory_database().await;
    let social = database.social();
    let author = Uuid::new_v4();
    let post = Post::new(author, "Gone soon".to_owned(), None);
    social.create_post(&post).await.unwrap();

    social.toggle_like(post.id, Uuid::new_v4()).await.unwrap();
    let comment = Comment::new(post.id, Uuid::new_v4(), "Bye".to_owned());
    assert_eq!(social.create_comment(&comment).await.unwrap(), author);

    assert!(!social.delete_post(Uuid::new_v4(), post.id).await.unwrap());
    assert!(social.delete_post(author, post.id).await.unwrap());

    for table in ["likes", "comments"] {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(database.pool())
            .await
            .unwrap();
        assert_eq!(count, 0, "{table}");
    }
    assert!(social.get_feed_post(post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let database = memory_database().await;
    database.migrate().await.unwrap();
    database.ping().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_likes_and_comments_on_file_database() {
    common::init_test_logging();
    let temp_dir = tempfile::tempdir().unwrap();
    let url = DatabaseUrl::SQLite {
        path: temp_dir.path().join("busy.db"),
    };
    let database = Database::new(&url).await.unwrap();
    let post = Post::new(Uuid::new_v4(), "Popular".to_owned(), None);
    database.social().create_post(&post).await.unwrap();
    let post_id = post.id;

    let likes: Vec<_> = (0..40)
        .map(|_| {
            let database = database.clone();
            tokio::spawn(async move { database.social().toggle_like(post_id, Uuid::new_v4()).await })
        })
        .collect();
    let comments: Vec<_> = (0..20)
        .map(|i| {
            let database = database.clone();
            tokio::spawn(async move {
                let comment = Comment::new(post_id, Uuid::new_v4(), format!("Nice one #{i}"));
                database.social().create_comment(&comment).await
            })
        })
        .collect();

    for task in likes {
        assert_eq!(task.await.unwrap().unwrap(), LikeToggle::Liked);
    }
    for task in comments {
        task.await.unwrap().unwrap();
    }

    assert_eq!(database.social().list_likes(post_id).await.unwrap().len(), 40);
    let feed_post = database.social().get_feed_post(post_id).await.unwrap().unwrap();
    assert_eq!(feed_post.likes.len(), 40);
    assert_eq!(feed_post.comments.len(), 20);
}

#[tokio::test]
async fn test_unpaged_feed_beyond_sqlite_variable_limit() {
    let database = memory_database().await;
    let author = Uuid::new_v4();
    sqlx::query(
        r"
        WITH RECURSIVE seq(n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < $1)
        INSERT INTO posts (id, user_id, content, created_at)
        SELECT printf('00000000-0000-4000-8000-%012d', n), $2, 'Post ' || n,
               '2025-03-10T08:00:00.000000Z'
        FROM seq
        ",
    )
    .bind(33_000_i64)
    .bind(author.to_string())
    .execute(database.pool())
    .await
    .unwrap();

    let oldest = Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap();
    let social = database.social();
    social.toggle_like(oldest, author).await.unwrap();
    social
        .create_comment(&Comment::new(oldest, author, "First!".to_owned()))
        .await
        .unwrap();

    let feed = social.list_feed(None, None).await.unwrap();
    assert_eq!(feed.len(), 33_000);
    let last = feed.last().unwrap();
    assert_eq!(last.post.id, oldest);
    assert_eq!(last.likes.len(), 1);
    assert_eq!(last.comments.len(), 1);
    assert!(feed[0].likes.is_empty());
}

#[tokio::test]
async fn test_list_workouts_loads_exercises_across_batches() {
    let database = memory_database().await;
    let user_id = Uuid::new_v4();
    sqlx::query(
        r"
        WITH RECURSIVE seq(n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < 1200)
        INSERT INTO workouts (id, user_id, title, description, duration, calories, level, created_at, updated_at)
        SELECT printf('00000000-0000-4000-8000-%012d', n), $1, 'Workout ' || n, '', 10, 50,
               'Beginner', '2025-03-10T08:00:00.000000Z', '2025-03-10T08:00:00.000000Z'
        FROM seq
        ",
    )
    .bind(user_id.to_string())
    .execute(database.pool())
    .await
    .unwrap();
    sqlx::query(
        r"
        INSERT INTO exercises (id, workout_id, position, name, sets, reps, weight)
        SELECT printf('00000000-0000-4000-9000-%012d', rowid), id, 0, 'Plank', 1, 1, NULL
        FROM workouts
        WHERE user_id = $1
        ",
    )
    .bind(user_id.to_string())
    .execute(database.pool())
    .await
    .unwrap();

    let workouts = database.workouts().list_workouts(user_id).await.unwrap();
    assert_eq!(workouts.len(), 1200);
    assert!(workouts.iter().all(|w| w.exercises.len() == 1));
}
