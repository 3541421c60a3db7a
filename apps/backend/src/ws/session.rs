use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::ErrorCode;
use crate::services::draft::DraftCoordinator;
use crate::state::app_state::AppState;
use crate::ws::protocol::{ActionRejected, ClientEvent, ServerEvent};
use crate::AppError;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = DraftSession::new(Uuid::new_v4(), app_state.coordinator());
    ws::start(session, &req, stream)
}

/// One websocket connection.
///
/// Inbound events are handled one at a time in arrival order; outbound
/// events arrive through the connection's registry queue.
pub struct DraftSession {
    conn_id: Uuid,
    coordinator: Arc<DraftCoordinator>,
    last_heartbeat: Instant,
}

impl DraftSession {
    pub fn new(conn_id: Uuid, coordinator: Arc<DraftCoordinator>) -> Self {
        Self {
            conn_id,
            coordinator,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, event: &ServerEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound event"),
        }
    }

    fn reject(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        game_id: Option<String>,
        err: AppError,
    ) {
        warn!(
            conn_id = %self.conn_id,
            game_id = game_id.as_deref().unwrap_or("-"),
            code = %err.code(),
            detail = %err.detail(),
            "[WS SESSION] request rejected"
        );
        Self::send_json(
            ctx,
            &ServerEvent::ActionRejected(ActionRejected {
                game_id,
                code: err.code(),
                message: err.detail(),
            }),
        );
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_text(&mut self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        let event = match serde_json::from_str::<ClientEvent>(text) {
            Ok(event) => event,
            Err(err) => {
                self.reject(
                    ctx,
                    None,
                    AppError::bad_request(ErrorCode::BadRequest, format!("Malformed event: {err}")),
                );
                return;
            }
        };

        let game_id = event.game_id().to_string();
        let joined = self.coordinator.registry().room_of(self.conn_id);
        if !matches!(event, ClientEvent::JoinGame(_)) && joined.as_deref() != Some(game_id.as_str()) {
            self.reject(
                ctx,
                Some(game_id),
                AppError::bad_request(ErrorCode::NotInRoom, "Join the game before sending events for it"),
            );
            return;
        }

        let coordinator = self.coordinator.clone();
        let conn_id = self.conn_id;
        // `wait` keeps this connection's events in order.
        ctx.wait(
            async move {
                match event {
                    ClientEvent::JoinGame(join) => {
                        coordinator.join_game(conn_id, &join.game_id).await;
                        Ok(())
                    }
                    ClientEvent::ReadyState(ready) => coordinator
                        .set_ready(&ready.game_id, ready.side, ready.is_ready)
                        .await
                        .map(|_| ()),
                    ClientEvent::DraftAction(req) => {
                        coordinator.submit_action(req).await.map(|_| ())
                    }
                    ClientEvent::SetWinner(set) => coordinator
                        .set_winner(&set.game_id, set.winner)
                        .await
                        .map(|_| ()),
                }
            }
            .into_actor(self)
            .map(move |res, actor, ctx| {
                if let Err(err) = res {
                    actor.reject(ctx, Some(game_id), AppError::from(err));
                }
            }),
        );
    }
}

impl Actor for DraftSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        let outbound = self.coordinator.registry().register(self.conn_id);
        ctx.add_stream(UnboundedReceiverStream::new(outbound));
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.coordinator.registry().leave(self.conn_id);
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<ServerEvent> for DraftSession {
    fn handle(&mut self, event: ServerEvent, ctx: &mut Self::Context) {
        Self::send_json(ctx, &event);
    }

    // The queue only closes once the registry forgets this connection.
    fn finished(&mut self, _ctx: &mut Self::Context) {
        debug!(conn_id = %self.conn_id, "[WS SESSION] outbound queue closed");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for DraftSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                self.handle_text(&text, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.reject(
                    ctx,
                    None,
                    AppError::bad_request(ErrorCode::BadRequest, "Binary frames are not supported"),
                );
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}
