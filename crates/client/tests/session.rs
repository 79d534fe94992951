//! Drives sessions over a scripted in-memory transport.

use std::{
    cell::{Cell, RefCell},
    io::{self, Cursor, Read, Write},
    rc::Rc,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use client::{
    conn::Closer,
    event::{
        ChatReceived, ChunkLoaded, Died, Disconnected, EntitiesDestroyed, GameStarted,
        HealthChanged, PositionChanged,
    },
    login::login,
    Connection, HandleError, Intercept, LoginError, Session, SessionError, SessionState, Step,
    Transport,
};
use common::{entity::player::relative, BlockId, BlockPos, ChunkPos};
use protocol::{
    codec::{Encode, VarInt},
    frame::{write_frame, FrameReader},
    ids::{clientbound as cb, login as lg, serverbound as sb},
    slot::Slot,
    ChatMessage, CodecError, RawPacket, Reader,
};
use uuid::Uuid;

struct Script {
    input: Cursor<Vec<u8>>,
    output: Arc<Mutex<Vec<u8>>>,
    closed: Arc<AtomicBool>,
    idle_at_end: bool,
}

impl Read for Script {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.closed.load(Ordering::SeqCst) {
            return Ok(0);
        }
        let n = self.input.read(buf)?;
        if n == 0 && self.idle_at_end {
            return Err(io::ErrorKind::WouldBlock.into());
        }
        Ok(n)
    }
}

impl Write for Script {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct ScriptCloser(Arc<AtomicBool>);

impl Closer for ScriptCloser {
    fn close(&self) -> io::Result<()> {
        self.0.store(true, Ordering::SeqCst);
        Ok(())
    }
}

impl Transport for Script {
    fn closer(&self) -> io::Result<Arc<dyn Closer>> {
        Ok(Arc::new(ScriptCloser(self.closed.clone())))
    }
}

/// Packets written by the client.
#[derive(Clone)]
struct Sent(Arc<Mutex<Vec<u8>>>);

impl Sent {
    fn packets(&self) -> Vec<RawPacket> {
        let mut frames = FrameReader::new();
        frames.extend(&self.0.lock().unwrap());
        let mut packets = Vec::new();
        while let Some(packet) = frames.next_frame().unwrap() {
            packets.push(packet);
        }
        packets
    }

    fn ids(&self) -> Vec<i32> {
        self.packets().iter().map(|p| p.id).collect()
    }
}

fn script(frames: Vec<(i32, Vec<u8>)>, idle_at_end: bool) -> (Connection<Script>, Sent) {
    let mut input = Vec::new();
    for (id, body) in frames {
        write_frame(id, &body, &mut input);
    }
    let output = Arc::new(Mutex::new(Vec::new()));
    let transport = Script {
        input: Cursor::new(input),
        output: output.clone(),
        closed: Arc::new(AtomicBool::new(false)),
        idle_at_end,
    };
    (Connection::new(transport), Sent(output))
}

fn session(frames: Vec<(i32, Vec<u8>)>) -> (Session<Script>, Sent) {
    let (conn, sent) = script(frames, false);
    (Session::new(conn).unwrap(), sent)
}

fn body(build: impl FnOnce(&mut Vec<u8>)) -> Vec<u8> {
    let mut out = Vec::new();
    build(&mut out);
    out
}

fn keep_alive(id: i64) -> (i32, Vec<u8>) {
    (cb::KEEP_ALIVE, body(|out| id.encode(out)))
}

fn update_health(health: f32) -> (i32, Vec<u8>) {
    (
        cb::UPDATE_HEALTH,
        body(|out| {
            health.encode(out);
            VarInt(20).encode(out);
            5.0f32.encode(out);
        }),
    )
}

fn position_and_look(pos: [f64; 3], yaw: f32, flags: u8, teleport_id: i32) -> (i32, Vec<u8>) {
    (
        cb::PLAYER_POSITION_AND_LOOK,
        body(|out| {
            for axis in pos {
                axis.encode(out);
            }
            yaw.encode(out);
            0.0f32.encode(out);
            flags.encode(out);
            VarInt(teleport_id).encode(out);
        }),
    )
}

fn join_game(entity_id: i32) -> (i32, Vec<u8>) {
    (
        cb::JOIN_GAME,
        body(|out| {
            entity_id.encode(out);
            1u8.encode(out);
            0i32.encode(out);
            0i64.encode(out);
            20u8.encode(out);
            "default".encode(out);
            VarInt(10).encode(out);
            false.encode(out);
            true.encode(out);
        }),
    )
}

fn spawn_object(entity_id: i32) -> (i32, Vec<u8>) {
    (
        cb::SPAWN_OBJECT,
        body(|out| {
            VarInt(entity_id).encode(out);
            Uuid::from_u128(entity_id as u128).encode(out);
            VarInt(2).encode(out);
            for axis in [1.0f64, 64.0, -3.0] {
                axis.encode(out);
            }
            0u8.encode(out);
            0u8.encode(out);
            0i32.encode(out);
            for v in [0i16; 3] {
                v.encode(out);
            }
        }),
    )
}

/// One section filled with air except for `block` at its origin.
fn section(block: i32, out: &mut Vec<u8>) {
    1i16.encode(out);
    4u8.encode(out);
    VarInt(2).encode(out);
    VarInt(0).encode(out);
    VarInt(block).encode(out);
    VarInt(256).encode(out);
    1u64.encode(out);
    for _ in 1..256 {
        0u64.encode(out);
    }
}

fn chunk_data(pos: ChunkPos, full_chunk: bool, section_index: u32, block: i32) -> (i32, Vec<u8>) {
    (
        cb::CHUNK_DATA,
        body(|out| {
            pos.x.encode(out);
            pos.z.encode(out);
            full_chunk.encode(out);
            VarInt(1 << section_index).encode(out);
            // empty heightmaps compound
            out.extend_from_slice(&[10, 0, 0, 0]);
            if full_chunk {
                for _ in 0..1024 {
                    0i32.encode(out);
                }
            }
            let data = body(|data| section(block, data));
            VarInt(data.len() as i32).encode(out);
            out.extend_from_slice(&data);
            VarInt(0).encode(out);
        }),
    )
}

fn run_all(session: &mut Session<Script>) -> Vec<Step> {
    let mut steps = Vec::new();
    loop {
        let step = session.step();
        steps.push(step);
        if step == Step::Finished {
            return steps;
        }
    }
}

fn failure(session: &Session<Script>) -> &SessionError {
    match session.state() {
        SessionState::Failed(err) => err,
        other => panic!("expected failure, got {:?}", other),
    }
}

#[test]
fn keep_alive_is_echoed() {
    let (mut session, sent) = session(vec![keep_alive(0x1234_5678_9abc)]);
    assert_eq!(session.step(), Step::Packet(cb::KEEP_ALIVE));

    let packets = sent.packets();
    assert_eq!(packets.len(), 1);
    assert_eq!(packets[0].id, sb::KEEP_ALIVE);
    assert_eq!(packets[0].body, 0x1234_5678_9abci64.to_be_bytes());
}

#[test]
fn teleport_is_confirmed_then_position_sent() {
    let (mut session, sent) = session(vec![
        position_and_look([1.5, 70.0, -2.5], 90.0, 0, 7),
        position_and_look([1.0, 1.0, 1.0], 0.0, relative::X | relative::Y | relative::Z, 8),
    ]);
    let moves = Rc::new(RefCell::new(Vec::new()));
    let recorded = moves.clone();
    session.events_mut().on(move |_, event: &PositionChanged| {
        recorded.borrow_mut().push(event.pos);
        Ok(())
    });

    session.step();
    assert_eq!(session.game().player().position(), [1.5, 70.0, -2.5]);
    assert_eq!(session.game().player().yaw, 90.0);
    assert_eq!(
        sent.ids(),
        [sb::TELEPORT_CONFIRM, sb::PLAYER_POSITION_AND_ROTATION]
    );
    let packets = sent.packets();
    assert_eq!(packets[0].body, [7]);
    assert_eq!(Reader::new(&packets[1].body).read::<f64>().unwrap(), 1.5);

    session.step();
    assert_eq!(session.game().player().position(), [2.5, 71.0, -1.5]);
    assert_eq!(sent.packets()[2].body, [8]);
    assert_eq!(*moves.borrow(), [[1.5, 70.0, -2.5], [2.5, 71.0, -1.5]]);
}

#[test]
fn death_is_reported_once() {
    let (mut session, sent) = session(vec![
        update_health(5.0),
        update_health(0.5),
        update_health(0.2),
    ]);
    let order = Rc::new(RefCell::new(Vec::new()));
    let (on_health, on_death) = (order.clone(), order.clone());
    let death_sent = sent.clone();
    session
        .events_mut()
        .on(move |_, event: &HealthChanged| {
            on_health.borrow_mut().push(format!("health {}", event.health));
            Ok(())
        })
        .on(move |cx, _: &Died| {
            assert!(cx.player().is_dead());
            // the absolute position is already on the wire
            assert_eq!(death_sent.ids(), [sb::PLAYER_POSITION_AND_ROTATION]);
            on_death.borrow_mut().push("died".to_owned());
            Ok(())
        });

    for _ in 0..3 {
        session.step();
    }

    assert_eq!(
        *order.borrow(),
        ["health 5", "health 0.5", "died", "health 0.2"]
    );
    assert_eq!(sent.ids(), [sb::PLAYER_POSITION_AND_ROTATION]);
    assert_eq!(session.game().player().health, 0.2);
}

#[test]
fn abilities_trigger_client_settings() {
    let (mut session, sent) = session(vec![(
        cb::PLAYER_ABILITIES,
        body(|out| {
            0x06i8.encode(out);
            0.05f32.encode(out);
            0.1f32.encode(out);
        }),
    )]);
    session.step();

    let abilities = session.game().player().abilities;
    assert!(abilities.flying());
    assert!(abilities.may_fly());
    assert!(!abilities.invulnerable());

    let packets = sent.packets();
    assert_eq!(packets.len(), 1);
    assert_eq!(packets[0].id, sb::CLIENT_SETTINGS);
    assert_eq!(Reader::new(&packets[0].body).read::<String>().unwrap(), "en_us");
}

#[test]
fn handled_packets_skip_built_in_handling() {
    let (mut session, sent) = session(vec![
        join_game(42),
        keep_alive(1),
        update_health(0.0),
        spawn_object(5),
    ]);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let intercepted = seen.clone();
    let events = Rc::new(Cell::new(0));
    let (started, died) = (events.clone(), events.clone());
    session
        .events_mut()
        .intercept(move |_, packet| {
            intercepted.borrow_mut().push(packet.id);
            Ok(Intercept::Handled)
        })
        .on(move |_, _: &GameStarted| {
            started.set(started.get() + 1);
            Ok(())
        })
        .on(move |_, _: &Died| {
            died.set(died.get() + 1);
            Ok(())
        });

    for _ in 0..4 {
        session.step();
    }

    assert_eq!(
        *seen.borrow(),
        [cb::JOIN_GAME, cb::KEEP_ALIVE, cb::UPDATE_HEALTH, cb::SPAWN_OBJECT]
    );
    assert_eq!(events.get(), 0);
    assert!(sent.packets().is_empty());
    assert_eq!(session.game().player().entity_id, 0);
    assert!(!session.game().player().is_dead());
    assert_eq!(session.game().world().entity_count(), 0);
}

#[test]
fn passed_packets_are_handled() {
    let (mut session, sent) = session(vec![keep_alive(3)]);
    session
        .events_mut()
        .intercept(|_, _| Ok(Intercept::Pass));
    session.step();
    assert_eq!(sent.ids(), [sb::KEEP_ALIVE]);
}

#[test]
fn destroyed_entities_are_removed() {
    let (mut session, _) = session(vec![
        spawn_object(5),
        spawn_object(7),
        spawn_object(9),
        spawn_object(12),
        (
            cb::DESTROY_ENTITIES,
            body(|out| {
                VarInt(3).encode(out);
                for id in [5, 9, 12] {
                    VarInt(id).encode(out);
                }
            }),
        ),
    ]);
    let destroyed = Rc::new(RefCell::new(Vec::new()));
    let recorded = destroyed.clone();
    session.events_mut().on(move |_, event: &EntitiesDestroyed| {
        recorded.borrow_mut().extend_from_slice(&event.ids);
        Ok(())
    });

    for _ in 0..5 {
        session.step();
    }

    let world = session.game().world();
    assert_eq!(world.entity_count(), 1);
    let survivor = world.entity(7).unwrap();
    assert_eq!(survivor.pos, [1.0, 64.0, -3.0]);
    assert_eq!(survivor.uuid, Uuid::from_u128(7));
    assert_eq!(*destroyed.borrow(), [5, 9, 12]);
}

#[test]
fn join_sets_player_identity() {
    let (mut session, _) = session(vec![join_game(42)]);
    let started = Rc::new(Cell::new(false));
    let flag = started.clone();
    session.events_mut().on(move |cx, _: &GameStarted| {
        assert_eq!(cx.player().entity_id, 42);
        flag.set(true);
        Ok(())
    });
    session.step();

    let player = session.game().player();
    assert_eq!(player.gamemode, common::GameMode::Creative);
    assert_eq!(player.level_type, "default");
    assert!(started.get());
}

#[test]
fn full_and_partial_chunks() {
    let pos = ChunkPos::new(2, -1);
    let (mut session, _) = session(vec![
        chunk_data(pos, true, 0, 9),
        chunk_data(pos, false, 1, 10),
    ]);
    let loads = Rc::new(RefCell::new(Vec::new()));
    let recorded = loads.clone();
    session.events_mut().on(move |_, event: &ChunkLoaded| {
        recorded.borrow_mut().push((event.pos, event.full_chunk));
        Ok(())
    });

    assert_eq!(session.step(), Step::Packet(cb::CHUNK_DATA));
    assert_eq!(session.step(), Step::Packet(cb::CHUNK_DATA));
    assert!(session.is_running());

    let world = session.game().world();
    assert_eq!(world.get_block(BlockPos::new(32, 0, -16)), BlockId(9));
    assert_eq!(world.get_block(BlockPos::new(32, 16, -16)), BlockId(10));
    assert_eq!(world.get_block(BlockPos::new(33, 0, -16)), BlockId::AIR);
    assert_eq!(*loads.borrow(), [(pos, true), (pos, false)]);
}

#[test]
fn map_packets_are_dropped_when_disabled() {
    let (conn, _) = script(
        vec![
            chunk_data(ChunkPos::new(0, 0), true, 0, 1),
            (cb::BLOCK_CHANGE, vec![0xff]),
            (cb::MULTI_BLOCK_CHANGE, vec![]),
        ],
        false,
    );
    let mut session = Session::new(conn).unwrap().with_receive_map(false);
    let loaded = Rc::new(Cell::new(false));
    let flag = loaded.clone();
    session.events_mut().on(move |_, _: &ChunkLoaded| {
        flag.set(true);
        Ok(())
    });

    assert_eq!(session.step(), Step::Packet(cb::CHUNK_DATA));
    assert_eq!(session.step(), Step::Packet(cb::BLOCK_CHANGE));
    assert_eq!(session.step(), Step::Packet(cb::MULTI_BLOCK_CHANGE));
    assert!(session.is_running());
    assert_eq!(session.game().world().chunk_count(), 0);
    assert!(!loaded.get());
}

#[test]
fn unknown_packets_are_ignored() {
    let (mut session, sent) = session(vec![(0x7f, vec![1, 2, 3]), keep_alive(1)]);
    assert_eq!(session.step(), Step::Packet(0x7f));
    assert!(session.is_running());
    assert_eq!(session.step(), Step::Packet(cb::KEEP_ALIVE));
    assert_eq!(sent.ids(), [sb::KEEP_ALIVE]);
}

#[test]
fn inventory_slots_and_cursor() {
    let stack = Slot::new(1, 64);
    let set_slot = |window: i8, slot: i16| {
        let stack = stack.clone();
        (
            cb::SET_SLOT,
            body(move |out| {
                window.encode(out);
                slot.encode(out);
                stack.encode(out);
            }),
        )
    };
    let (mut session, _) = session(vec![set_slot(0, 36), set_slot(-1, -1), set_slot(3, 36)]);
    for _ in 0..3 {
        session.step();
    }

    let game = session.game();
    assert_eq!(game.hotbar(0), Some(&stack));
    assert_eq!(game.held_item(), Some(&stack));
    assert_eq!(game.cursor(), &stack);
    assert_eq!(game.inventory().iter().filter(|s| !s.is_empty()).count(), 1);
}

#[test]
fn disconnect_ends_session_cleanly() {
    let (session, _) = session(vec![
        keep_alive(1),
        (
            cb::DISCONNECT,
            body(|out| ChatMessage::text("Server closed").encode(out)),
        ),
        keep_alive(2),
    ]);
    let mut session = session;
    let reason = Rc::new(RefCell::new(None));
    let recorded = reason.clone();
    session.events_mut().on(move |_, event: &Disconnected| {
        *recorded.borrow_mut() = Some(event.reason.plain_text());
        Ok(())
    });

    let returned = session.run().unwrap();
    assert_eq!(returned.plain_text(), "Server closed");
    assert_eq!(reason.borrow().as_deref(), Some("Server closed"));
}

#[test]
fn disconnect_finishes_steps() {
    let (mut session, sent) = session(vec![
        (cb::DISCONNECT, body(|out| ChatMessage::text("bye").encode(out))),
        keep_alive(2),
    ]);
    let handle = session.handle();

    assert_eq!(run_all(&mut session), [Step::Finished]);
    assert!(matches!(session.state(), SessionState::Disconnected(_)));
    assert_eq!(session.step(), Step::Finished);
    assert!(sent.packets().is_empty());
    assert!(handle.is_closed());
}

#[test]
fn end_of_stream_fails_session() {
    let (mut session, _) = session(vec![keep_alive(1)]);
    let handle = session.handle();

    assert_eq!(run_all(&mut session), [Step::Packet(cb::KEEP_ALIVE), Step::Finished]);
    let err = failure(&session);
    assert!(matches!(err, SessionError::TransportClosed));
    assert_eq!(err.packet_id(), None);

    assert!(handle.is_closed());
    assert!(matches!(handle.submit(|_| Ok(())), Err(HandleError::SessionClosed)));
}

#[test]
fn malformed_packet_fails_with_its_id() {
    let (mut session, _) = session(vec![(cb::KEEP_ALIVE, vec![0, 0, 1])]);
    assert_eq!(session.step(), Step::Finished);

    let err = failure(&session);
    assert_eq!(err.packet_id(), Some(cb::KEEP_ALIVE));
    assert!(matches!(
        err.kind(),
        SessionError::Codec(CodecError::TruncatedPayload { .. })
    ));
}

#[test]
fn oversized_chunk_entries_fail_session() {
    let (mut session, _) = session(vec![(
        cb::CHUNK_DATA,
        body(|out| {
            0i32.encode(out);
            0i32.encode(out);
            false.encode(out);
            VarInt(1).encode(out);
            out.extend_from_slice(&[10, 0, 0, 0]);
            let data = body(|data| {
                0i16.encode(data);
                64u8.encode(data);
                VarInt(4096).encode(data);
                data.resize(data.len() + 4096 * 8, 0);
            });
            VarInt(data.len() as i32).encode(out);
            out.extend_from_slice(&data);
            VarInt(0).encode(out);
        }),
    )]);
    assert_eq!(session.step(), Step::Finished);

    let err = failure(&session);
    assert_eq!(err.packet_id(), Some(cb::CHUNK_DATA));
    assert!(matches!(
        err.kind(),
        SessionError::Codec(CodecError::InvalidBitsPerBlock(64))
    ));
    assert_eq!(session.game().world().chunk_count(), 0);
}

#[test]
fn failing_handler_fails_session() {
    let (mut session, _) = session(vec![(
        cb::CHAT_MESSAGE,
        body(|out| {
            ChatMessage::text("hi").encode(out);
            0i8.encode(out);
        }),
    )]);
    session
        .events_mut()
        .on(|_, _: &ChatReceived| Err(anyhow::anyhow!("not today")));

    session.step();
    let err = failure(&session);
    assert_eq!(err.packet_id(), Some(cb::CHAT_MESSAGE));
    assert!(matches!(err.kind(), SessionError::HandlerRejected(_)));
}

#[test]
fn tasks_run_before_reads() {
    let (mut session, sent) = session(vec![keep_alive(1)]);
    let handle = session.handle();
    handle
        .submit(|cx| {
            cx.select_item(3)?;
            Ok(())
        })
        .unwrap();

    assert_eq!(session.step(), Step::Task);
    assert_eq!(session.game().player().held_item, 3);
    assert_eq!(session.step(), Step::Packet(cb::KEEP_ALIVE));
    assert_eq!(sent.ids(), [sb::HELD_ITEM_CHANGE, sb::KEEP_ALIVE]);
}

#[test]
fn failing_task_fails_session() {
    let (mut session, _) = session(vec![keep_alive(1)]);
    session
        .handle()
        .submit(|_| Err(anyhow::anyhow!("gave up")))
        .unwrap();

    assert_eq!(session.step(), Step::Finished);
    let err = failure(&session);
    assert!(matches!(err, SessionError::TaskFailed(_)));
    assert_eq!(err.packet_id(), None);
}

#[test]
fn rejected_action_fails_task() {
    let (mut session, sent) = session(vec![]);
    session
        .handle()
        .submit(|cx| {
            cx.select_item(9)?;
            Ok(())
        })
        .unwrap();

    session.step();
    assert!(matches!(failure(&session), SessionError::TaskFailed(_)));
    assert!(sent.packets().is_empty());
}

#[test]
fn timed_out_read_is_idle() {
    let (conn, _) = script(vec![], true);
    let mut session = Session::new(conn).unwrap();
    assert_eq!(session.step(), Step::Idle);
    assert!(session.is_running());
}

#[test]
fn closing_the_handle_ends_the_session() {
    let (conn, _) = script(vec![keep_alive(1)], true);
    let mut session = Session::new(conn).unwrap();
    let handle = session.handle();
    handle.close().unwrap();

    assert_eq!(session.step(), Step::Finished);
    assert!(matches!(failure(&session), SessionError::TransportClosed));
}

#[test]
fn call_from_handler_is_rejected() {
    let (mut session, _) = session(vec![join_game(1)]);
    let handle = session.handle();
    let result = Rc::new(RefCell::new(None));
    let recorded = result.clone();
    session.events_mut().on(move |_, _: &GameStarted| {
        *recorded.borrow_mut() = Some(handle.call(|_| ()));
        Ok(())
    });

    session.step();
    assert!(matches!(
        result.borrow_mut().take(),
        Some(Err(HandleError::Reentrant))
    ));
}

fn login_success() -> (i32, Vec<u8>) {
    (
        lg::LOGIN_SUCCESS,
        body(|out| {
            "069a79f4-44e9-4726-a5be-fca90e38aaf5".encode(out);
            "Notch".encode(out);
        }),
    )
}

#[test]
fn offline_login() {
    let (mut conn, sent) = script(
        vec![
            (
                lg::LOGIN_PLUGIN_REQUEST,
                body(|out| {
                    VarInt(4).encode(out);
                    "velocity:player_info".encode(out);
                    out.push(1);
                }),
            ),
            login_success(),
        ],
        false,
    );
    let profile = login(&mut conn, "localhost", 25565, "Notch").unwrap();
    assert_eq!(profile.username, "Notch");
    assert_eq!(
        profile.uuid,
        Uuid::parse_str("069a79f4-44e9-4726-a5be-fca90e38aaf5").unwrap()
    );

    let packets = sent.packets();
    assert_eq!(
        packets.iter().map(|p| p.id).collect::<Vec<_>>(),
        [lg::HANDSHAKE, lg::LOGIN_START, lg::LOGIN_PLUGIN_RESPONSE]
    );
    let mut handshake = Reader::new(&packets[0].body);
    assert_eq!(handshake.read::<VarInt>().unwrap().0, 578);
    assert_eq!(Reader::new(&packets[1].body).read::<String>().unwrap(), "Notch");
    // message id, then "not understood"
    assert_eq!(packets[2].body, [4, 0]);
}

#[test]
fn online_mode_is_rejected() {
    let (mut conn, _) = script(
        vec![(
            lg::ENCRYPTION_REQUEST,
            body(|out| {
                "".encode(out);
                VarInt(0).encode(out);
                VarInt(0).encode(out);
            }),
        )],
        false,
    );
    assert!(matches!(
        login(&mut conn, "localhost", 25565, "Notch"),
        Err(LoginError::EncryptionRequired)
    ));
}

#[test]
fn login_disconnect_carries_reason() {
    let (mut conn, _) = script(
        vec![(
            lg::DISCONNECT,
            body(|out| ChatMessage::text("Whitelisted").encode(out)),
        )],
        false,
    );
    match login(&mut conn, "localhost", 25565, "Notch") {
        Err(LoginError::Rejected(reason)) => assert_eq!(reason.plain_text(), "Whitelisted"),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn compression_is_rejected() {
    let (mut conn, _) = script(
        vec![(lg::SET_COMPRESSION, body(|out| VarInt(256).encode(out)))],
        false,
    );
    assert!(matches!(
        login(&mut conn, "localhost", 25565, "Notch"),
        Err(LoginError::CompressionUnsupported(256))
    ));
}
