use crate::images::HtmlImageProvider;
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Timeout;
use pairflip_core as game;
use std::time::Duration;
use web_sys::HtmlImageElement;
use yew::prelude::*;

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed for the first deal instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of pairs on the board
    #[arg(long, default_value_t = game::GameConfig::DEFAULT_PAIRS)]
    pub pairs: game::PairCount,

    /// Size of the symbol pool the deck draws from
    #[arg(long, default_value_t = 64)]
    pub symbols: u16,

    /// Milliseconds a mismatched pair stays visible, 0 turns it back immediately
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u32,

    /// Card picture URL, `{id}` is replaced with the symbol
    #[arg(long, default_value = "https://picsum.photos/seed/pairflip-{id}/160/160")]
    pub image_url: String,
}

impl GameProps {
    fn game_config(&self) -> game::GameConfig {
        game::GameConfig::new(
            self.pairs,
            game::SymbolUniverse::range(0, self.symbols),
            Duration::from_millis(self.delay_ms.into()),
        )
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Msg {
    Flip(game::Position),
    FlipBack(game::ResolveTicket),
    Preloaded(
        game::SessionId,
        Result<Vec<HtmlImageElement>, game::GameError>,
    ),
    NewGame,
}

fn state_class(state: game::EngineState, failed: bool) -> &'static str {
    use game::EngineState::*;
    match state {
        Loading if failed => "failed",
        Loading => "loading",
        Ready => "not-started",
        AwaitingFirstFlip | AwaitingSecondFlip => "in-progress",
        Resolving => "resolving",
        Won => "win",
    }
}

fn card_class(face: game::CardFace, locked: bool) -> Classes {
    use game::CardFace::*;

    let mut class = classes!(
        "card",
        match face {
            Hidden => classes!(),
            Revealed(symbol) => classes!("open", format!("sym-{}", symbol)),
            Matched(symbol) => classes!("open", "matched", format!("sym-{}", symbol)),
        }
    );
    if locked {
        class.push("locked");
    }
    class
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    position: game::Position,
    face: game::CardFace,
    #[prop_or_default]
    image: Option<AttrValue>,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::Position>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        position,
        face,
        image,
        locked,
        callback,
    } = props.clone();

    let class = card_class(face, locked);
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", position);
        callback.emit(position);
    });

    html! {
        <td {class} {onclick}>
            if let Some(src) = image {
                <img {src} alt="" draggable="false"/>
            }
        </td>
    }
}

pub(crate) struct GameView {
    game: game::Game,
    provider: HtmlImageProvider,
    next_seed: Option<u64>,
    /// Keeps the decoded pictures of the current session alive.
    _images: Vec<HtmlImageElement>,
    /// Dropping the timeout cancels the pending flip-back.
    flip_back_timer: Option<Timeout>,
}

impl GameView {
    fn start_game(&mut self, ctx: &Context<Self>) {
        self.flip_back_timer = None;
        self._images.clear();

        let seed = self.next_seed.take().unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        match self.game.start(seed) {
            Ok(request) => {
                let provider = self.provider.clone();
                ctx.link().send_future(async move {
                    let result = game::preload_images(&provider, request.symbols)
                        .await
                        .map(|loaded| loaded.into_iter().map(|(_, image)| image).collect());
                    Msg::Preloaded(request.session, result)
                });
            }
            Err(err) => log::error!("could not start game: {}", err),
        }
    }

    fn schedule_flip_back(&mut self, ctx: &Context<Self>, ticket: game::ResolveTicket) {
        // zero delay already turned the pair back
        if self.game.state() != game::EngineState::Resolving {
            return;
        }

        let millis = self
            .game
            .mismatch_delay()
            .as_millis()
            .try_into()
            .unwrap_or(u32::MAX);
        let link = ctx.link().clone();
        self.flip_back_timer = Some(Timeout::new(millis, move || {
            link.send_message(Msg::FlipBack(ticket))
        }));
    }

    fn image_for(&self, face: game::CardFace) -> Option<AttrValue> {
        face.symbol()
            .map(|symbol| AttrValue::from(self.provider.url_for(symbol)))
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut view = Self {
            game: game::Game::new(props.game_config()),
            provider: HtmlImageProvider::new(props.image_url.clone()),
            next_seed: props.seed,
            _images: Vec::new(),
            flip_back_timer: None,
        };
        view.start_game(ctx);
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Flip(position) => match self.game.flip(position) {
                Ok(game::FlipOutcome::Mismatched(ticket)) => {
                    log::debug!("mismatch, moves: {}", self.game.snapshot().moves);
                    self.schedule_flip_back(ctx, ticket);
                    true
                }
                Ok(outcome) => {
                    log::debug!("flip {}: {:?}", position, outcome);
                    outcome.has_update()
                }
                Err(err) => {
                    log::warn!("flip {} rejected: {}", position, err);
                    false
                }
            },
            FlipBack(ticket) => {
                self.flip_back_timer = None;
                self.game.flip_back(ticket)
            }
            Preloaded(session, result) => {
                let result = result.map(|images| {
                    if session == self.game.session() {
                        self._images = images;
                    }
                });
                // an error is recorded on the game and needs a redraw
                self.game.finish_preload(session, result).unwrap_or(true)
            }
            NewGame => {
                self.start_game(ctx);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let snapshot = self.game.snapshot();
        let columns = grid_columns(snapshot.cards.len());
        let is_playable = snapshot.state.accepts_flips();
        let state_class = state_class(snapshot.state, self.game.error().is_some());
        let moves = format_for_counter(snapshot.moves);
        let pairs_left = format_for_counter(
            snapshot.pairs.saturating_sub(snapshot.matched_pairs).into(),
        );

        let cb_new_game = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            NewGame
        });
        let cb_flip = ctx.link().callback(Flip);

        let cards: Vec<(game::Position, game::CardFace)> =
            (0..).zip(snapshot.cards.iter().copied()).collect();

        html! {
            <div class="pairflip">
                <nav>
                    <aside>{moves}</aside>
                    <span><button class={state_class} onclick={cb_new_game}/></span>
                    <aside>{pairs_left}</aside>
                </nav>
                if let Some(err) = self.game.error() {
                    <p class="error">{err.to_string()}</p>
                }
                if snapshot.won {
                    <p class="won">{format!("Solved in {} moves", snapshot.moves)}</p>
                }
                <table class={is_playable.then_some("playable")}>
                    {
                        for cards.chunks(columns).map(|row| html! {
                            <tr>
                                {
                                    for row.iter().map(|&(position, face)| {
                                        let locked = !is_playable || face.is_face_up();
                                        let image = self.image_for(face);
                                        let callback = cb_flip.clone();
                                        html! {
                                            <CardView {position} {face} {image} {locked} {callback}/>
                                        }
                                    })
                                }
                            </tr>
                        })
                    }
                </table>
            </div>
        }
    }
}
