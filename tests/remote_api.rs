//! Online-branch tests for the repository dispatcher, against an in-process
//! mock of the board REST API.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tempfile::TempDir;

use taskboard::connectivity::ConnectivityMonitor;
use taskboard::remote::{ApiClient, RemoteError};
use taskboard::repo::Repository;
use taskboard::store::{Board, CacheStore, Column, Task};

fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

#[derive(Default)]
struct ServerState {
    boards: Vec<Board>,
    columns: Vec<Column>,
    tasks: Vec<Task>,
    next_id: u32,
    fail: bool,
}

type Shared = Arc<Mutex<ServerState>>;

async fn list_boards(State(state): State<Shared>) -> Response {
    let s = state.lock().unwrap();
    if s.fail {
        return (StatusCode::INTERNAL_SERVER_ERROR, "server exploded").into_response();
    }
    Json(s.boards.clone()).into_response()
}

async fn create_board(State(state): State<Shared>, Json(mut board): Json<Board>) -> Json<Board> {
    let mut s = state.lock().unwrap();
    s.next_id += 1;
    board.id = format!("srv-{}", s.next_id);
    s.boards.push(board.clone());
    Json(board)
}

async fn update_board(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(board): Json<Board>,
) -> Response {
    let mut s = state.lock().unwrap();
    match s.boards.iter_mut().find(|b| b.id == id) {
        Some(existing) => {
            *existing = board.clone();
            Json(board).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_board(State(state): State<Shared>, Path(id): Path<String>) -> StatusCode {
    let mut s = state.lock().unwrap();
    s.boards.retain(|b| b.id != id);
    StatusCode::NO_CONTENT
}

async fn list_columns(State(state): State<Shared>, Path(board_id): Path<String>) -> Json<Vec<Column>> {
    let s = state.lock().unwrap();
    let mut columns: Vec<Column> = s
        .columns
        .iter()
        .filter(|c| c.board_id == board_id)
        .cloned()
        .collect();
    columns.sort_by_key(|c| c.position);
    Json(columns)
}

async fn create_column(State(state): State<Shared>, Json(mut column): Json<Column>) -> Json<Column> {
    let mut s = state.lock().unwrap();
    s.next_id += 1;
    column.id = format!("srv-{}", s.next_id);
    s.columns.push(column.clone());
    Json(column)
}

async fn update_column(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(column): Json<Column>,
) -> Response {
    let mut s = state.lock().unwrap();
    match s.columns.iter_mut().find(|c| c.id == id) {
        Some(existing) => {
            *existing = column.clone();
            Json(column).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_column(State(state): State<Shared>, Path(id): Path<String>) -> StatusCode {
    let mut s = state.lock().unwrap();
    s.columns.retain(|c| c.id != id);
    StatusCode::NO_CONTENT
}

async fn list_tasks(State(state): State<Shared>, Path(column_id): Path<String>) -> Json<Vec<Task>> {
    let s = state.lock().unwrap();
    let mut tasks: Vec<Task> = s
        .tasks
        .iter()
        .filter(|t| t.column_id == column_id)
        .cloned()
        .collect();
    tasks.sort_by_key(|t| t.position);
    Json(tasks)
}

async fn create_task(State(state): State<Shared>, Json(mut task): Json<Task>) -> Json<Task> {
    let mut s = state.lock().unwrap();
    s.next_id += 1;
    task.id = format!("srv-{}", s.next_id);
    s.tasks.push(task.clone());
    Json(task)
}

async fn update_task(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(task): Json<Task>,
) -> Response {
    let mut s = state.lock().unwrap();
    match s.tasks.iter_mut().find(|t| t.id == id) {
        Some(existing) => {
            *existing = task.clone();
            Json(task).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_task(State(state): State<Shared>, Path(id): Path<String>) -> StatusCode {
    let mut s = state.lock().unwrap();
    s.tasks.retain(|t| t.id != id);
    StatusCode::NO_CONTENT
}

async fn spawn_server(state: Shared) -> String {
    let app = Router::new()
        .route("/v1/board", get(list_boards).post(create_board))
        .route("/v1/board/{id}", put(update_board).delete(delete_board))
        .route("/v1/column", post(create_column))
        .route("/v1/column/from/{board_id}", get(list_columns))
        .route("/v1/column/{id}", put(update_column).delete(delete_column))
        .route("/v1/task", post(create_task))
        .route("/v1/task/from/{column_id}", get(list_tasks))
        .route("/v1/task/{id}", put(update_task).delete(delete_task))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock server");
    });
    format!("http://{}", addr)
}

struct Fixture {
    _dir: TempDir,
    cache: Arc<CacheStore>,
    connectivity: Arc<ConnectivityMonitor>,
    client: ApiClient,
    state: Shared,
}

async fn setup() -> Fixture {
    init_crypto();
    let state: Shared = Arc::new(Mutex::new(ServerState::default()));
    let base_url = spawn_server(Arc::clone(&state)).await;
    let dir = TempDir::new().expect("temp dir");
    let cache = Arc::new(CacheStore::open(dir.path()));
    let connectivity = Arc::new(ConnectivityMonitor::new());
    let client = ApiClient::new(Some(base_url));
    Fixture {
        _dir: dir,
        cache,
        connectivity,
        client,
        state,
    }
}

fn board_repo(fx: &Fixture) -> Repository<Board> {
    Repository::new(
        fx.client.clone(),
        Arc::clone(&fx.cache),
        Arc::clone(&fx.connectivity),
    )
}

fn column_repo(fx: &Fixture) -> Repository<Column> {
    Repository::new(
        fx.client.clone(),
        Arc::clone(&fx.cache),
        Arc::clone(&fx.connectivity),
    )
}

fn task_repo(fx: &Fixture) -> Repository<Task> {
    Repository::new(
        fx.client.clone(),
        Arc::clone(&fx.cache),
        Arc::clone(&fx.connectivity),
    )
}

fn make_task(id: &str, column_id: &str, position: i64) -> Task {
    Task {
        id: id.to_string(),
        name: format!("task {}", id),
        position,
        created_at: "2025-01-01 00:00:00".to_string(),
        due_date: "2025-02-01 00:00:00".to_string(),
        completed: false,
        tags: vec!["wire".to_string()],
        column_id: column_id.to_string(),
    }
}

#[tokio::test]
async fn online_insert_takes_server_assigned_id_and_writes_through() {
    let fx = setup().await;
    let boards = board_repo(&fx);

    let created = boards
        .insert(Board {
            id: "client-1".to_string(),
            name: "Release".to_string(),
        })
        .await
        .expect("online insert");

    assert!(created.id.starts_with("srv-"));

    // The cache holds the server entity, not the client draft.
    let cached = fx.cache.boards();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].id, created.id);

    // And the offline branch now serves it.
    fx.connectivity.set_online(false);
    let offline = boards.get_all(None).await.unwrap();
    assert_eq!(offline, vec![created]);
}

#[tokio::test]
async fn online_get_all_upserts_every_returned_entity() {
    let fx = setup().await;
    {
        let mut s = fx.state.lock().unwrap();
        s.boards.push(Board {
            id: "b1".to_string(),
            name: "One".to_string(),
        });
        s.boards.push(Board {
            id: "b2".to_string(),
            name: "Two".to_string(),
        });
    }

    let boards = board_repo(&fx);
    let listed = boards.get_all(None).await.unwrap();
    assert_eq!(listed.len(), 2);

    fx.connectivity.set_online(false);
    assert_eq!(boards.get_all(None).await.unwrap().len(), 2);
}

#[tokio::test]
async fn online_column_reads_are_scoped_to_the_board() {
    let fx = setup().await;
    let columns = column_repo(&fx);

    let c1 = columns
        .insert(Column {
            id: String::new(),
            name: "Todo".to_string(),
            position: 0,
            board_id: "b1".to_string(),
        })
        .await
        .unwrap();
    columns
        .insert(Column {
            id: String::new(),
            name: "Other".to_string(),
            position: 0,
            board_id: "b2".to_string(),
        })
        .await
        .unwrap();

    let listed = columns.get_all(Some("b1")).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, c1.id);
}

#[tokio::test]
async fn online_update_caches_the_supplied_entity() {
    let fx = setup().await;
    let tasks = task_repo(&fx);

    let created = tasks.insert(make_task("", "c1", 0)).await.unwrap();

    let mut moved = created.clone();
    moved.position = 5;
    tasks.update(&created.id, moved).await.unwrap();

    let cached = fx.cache.tasks_in_column("c1");
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].position, 5);
    // Omitted nothing, so the merge kept the rest intact.
    assert_eq!(cached[0].tags, vec!["wire".to_string()]);
}

#[tokio::test]
async fn online_delete_column_cascades_in_the_cache() {
    let fx = setup().await;
    let columns = column_repo(&fx);
    let tasks = task_repo(&fx);

    let column = columns
        .insert(Column {
            id: String::new(),
            name: "Todo".to_string(),
            position: 0,
            board_id: "b1".to_string(),
        })
        .await
        .unwrap();
    let task = tasks.insert(make_task("", &column.id, 0)).await.unwrap();

    columns.delete(&column.id).await.unwrap();

    assert!(fx.cache.columns("b1").is_empty());
    assert!(fx.cache.tasks_in_column(&column.id).is_empty());
    assert!(!fx.state.lock().unwrap().columns.iter().any(|c| c.id == column.id));
    // The server never saw a task delete; only the cache cascades locally.
    assert!(fx.state.lock().unwrap().tasks.iter().any(|t| t.id == task.id));
}

#[tokio::test]
async fn server_error_propagates_instead_of_falling_back_to_cache() {
    let fx = setup().await;
    let boards = board_repo(&fx);

    // Seed the cache through the offline branch first.
    fx.connectivity.set_online(false);
    boards
        .insert(Board {
            id: "local-1".to_string(),
            name: "Cached".to_string(),
        })
        .await
        .unwrap();

    fx.connectivity.set_online(true);
    fx.state.lock().unwrap().fail = true;

    match boards.get_all(None).await {
        Err(RemoteError::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected Api error, got {:?}", other.map(|v| v.len())),
    }
}

#[tokio::test]
async fn missing_entity_update_surfaces_the_status() {
    let fx = setup().await;
    let boards = board_repo(&fx);

    let result = boards
        .update(
            "nope",
            Board {
                id: "nope".to_string(),
                name: "Ghost".to_string(),
            },
        )
        .await;

    match result {
        Err(RemoteError::Api { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected Api error, got {:?}", other.is_ok()),
    }
}
