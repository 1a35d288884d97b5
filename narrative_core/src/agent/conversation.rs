//! Talking: addressing another character, and answering whatever was put to us.
//!
//! Every line spoken to someone leaves them a [`Topic`], so conversations chain: the
//! addressee answers on its next turn, which may in turn leave a topic on the speaker.

use rand::Rng;
use story_world::ActorId;

use super::{Nerves, Stage, Topic, TopicKind};
use crate::beliefs::{BeliefKind, CourseOfAction, Goal, ItemLocation};

impl<R: Rng> Stage<R> {
    /// Say something to `other` and leave them a topic to respond to.
    ///
    /// The line is logged once, from the speaker's side.
    pub fn address(
        &mut self,
        who: ActorId,
        other: ActorId,
        kind: TopicKind,
        subject: Option<ActorId>,
        phrase: impl Into<String>,
        participants: &[ActorId],
    ) {
        self.mind_mut(other).topic = Some(Topic {
            kind,
            originator: who,
            subject,
        });
        self.emit(phrase, participants);
    }

    pub fn greet(&mut self, who: ActorId, other: ActorId, phrase: &str) {
        self.address(who, other, TopicKind::Greet, None, phrase, &[who, other]);
    }

    fn speak_to(
        &mut self,
        who: ActorId,
        other: ActorId,
        phrase: impl Into<String>,
        participants: &[ActorId],
        subject: Option<ActorId>,
    ) {
        self.address(who, other, TopicKind::Speech, subject, phrase, participants);
    }

    fn question(
        &mut self,
        who: ActorId,
        other: ActorId,
        phrase: impl Into<String>,
        participants: &[ActorId],
        subject: Option<ActorId>,
    ) {
        self.address(who, other, TopicKind::Question, subject, phrase, participants);
    }

    /// Respond to a topic. The topic has already been cleared.
    pub(super) fn converse(&mut self, who: ActorId, topic: Topic) {
        let other = topic.originator;
        tracing::debug!(
            who = %self.world.name(who),
            other = %self.world.name(other),
            kind = ?topic.kind,
            "conversing"
        );
        match (topic.kind, topic.subject) {
            (TopicKind::ThreatGiveMe, Some(subject)) => self.give_me(who, other, subject),
            (TopicKind::ThreatTellMe, Some(subject)) => self.tell_me(who, other, subject),
            (TopicKind::ThreatAgree, Some(subject)) => self.agree(who, other, subject),
            (TopicKind::WhereQuestion, Some(subject)) => self.answer_where(who, other, subject),
            (TopicKind::Greet, _) => self.greet_back(who, other),
            (TopicKind::Question, subject) => self.answer_question(who, other, subject),
            (TopicKind::Speech, _) => self.reply(who, other),
            (kind, None) => panic!("{:?} topic from {} has no subject", kind, self.world.name(other)),
        }
    }

    fn give_me(&mut self, who: ActorId, other: ActorId, subject: ActorId) {
        if self.world.holds(who, subject) {
            self.speak_to(who, other, "'Please don't shoot!', <1> cried", &[who, other, subject], None);
            self.give_to(who, other, subject);
        } else {
            self.speak_to(
                who,
                other,
                "'But I don't have <3>!' protested <1>",
                &[who, other, subject],
                None,
            );
        }
    }

    fn tell_me(&mut self, who: ActorId, other: ActorId, subject: ActorId) {
        match self.recall_location(who, subject) {
            None => self.speak_to(
                who,
                other,
                "'I have no memory of that, <2>,' <1> replied",
                &[who, other, subject],
                None,
            ),
            Some(belief) => {
                self.speak_to(
                    who,
                    other,
                    "'Please don't shoot!', <1> cried, '<he-3> <is-3> in <4>'",
                    &[who, other, subject, belief.location],
                    None,
                );
                self.believe_location(other, subject, belief.location, Some(who), Some(who));
            }
        }
    }

    fn agree(&mut self, who: ActorId, other: ActorId, subject: ActorId) {
        self.speak_to(
            who,
            other,
            "'You make a persuasive case for remaining undecided, <2>,' said <1>",
            &[who, other],
            None,
        );
        self.beliefs_mut(who).remove(BeliefKind::Goal, subject);
        self.beliefs_mut(other)
            .nested_mut(who)
            .remove(BeliefKind::Goal, subject);
    }

    fn greet_back(&mut self, who: ActorId, other: ActorId) {
        self.emit("'Hello, <2>,' replied <1>", &[who, other]);

        let alarm = self
            .items(who)
            .alarm
            .and_then(|alarm| self.recall_location(who, alarm));
        if let Some(memory) = alarm {
            return self.discuss(who, other, memory);
        }

        let carried = self
            .world
            .contents(other)
            .iter()
            .copied()
            .find(|x| self.world.actor(*x).is_notable());
        if let Some(thing) = carried {
            self.remember(who, thing, other);
            self.speak_to(
                who,
                other,
                "'I see you are carrying <indef-3>,' said <1>",
                &[who, other, thing],
                None,
            );
            return;
        }

        match self.rng.gen_range(0..4) {
            0 => self.question(
                who,
                other,
                "'Lovely weather we're having, isn't it?' asked <1>",
                &[who, other],
                None,
            ),
            1 => self.speak_to(
                who,
                other,
                "'I was wondering where you were,' said <1>",
                &[who, other],
                None,
            ),
            _ => {}
        }
    }

    fn answer_question(&mut self, who: ActorId, other: ActorId, subject: Option<ActorId>) {
        if let Some(subject) = subject {
            if self.rng.gen_bool(0.5) {
                return self.speak_to(
                    who,
                    other,
                    "'I know nothing about <3>, <2>,' explained <1>",
                    &[who, other, subject],
                    None,
                );
            }
        }
        self.speak_to(who, other, "'Perhaps, <2>,' replied <1>", &[who, other], None);
    }

    fn answer_where(&mut self, who: ActorId, other: ActorId, subject: ActorId) {
        let Some(belief) = self.recall_location(who, subject) else {
            return self.speak_to(
                who,
                other,
                "'I don't know,' <1> answered simply",
                &[who, other, subject],
                None,
            );
        };
        if belief.concealer == Some(who) {
            self.question(
                who,
                other,
                "'Why do you want to know where <3> is, <2>?'",
                &[who, other, subject],
                None,
            );
        } else if self.world.holds(who, subject) {
            self.speak_to(
                who,
                other,
                "'I've got <3> right here, <2>'",
                &[who, other, subject],
                None,
            );
            self.put_down(who, subject);
        } else {
            if self.world.actor(belief.location).is_animate() {
                self.speak_to(
                    who,
                    other,
                    "'I think <3> has <4>,', <1> recalled",
                    &[who, other, belief.location, subject],
                    None,
                );
            } else {
                self.speak_to(
                    who,
                    other,
                    "'I believe it's in <3>, <2>,', <1> recalled",
                    &[who, other, belief.location],
                    None,
                );
            }
            self.believe_location(other, subject, belief.location, Some(who), None);
        }
    }

    fn reply(&mut self, who: ActorId, other: ActorId) {
        match self.rng.gen_range(0..6) {
            0 => self.emit("<1> nodded", &[who]),
            1 => self.emit("<1> remained silent", &[who]),
            2 => self.question(who, other, "'Do you really think so?' asked <1>", &[who, other], None),
            3 => self.speak_to(who, other, "'Yes, it's a shame really,' stated <1>", &[who, other], None),
            4 => self.speak_to(who, other, "'Oh, I know, I know,' said <1>", &[who, other], None),
            _ => self.speak_to(who, other, "'I see, <2>, I see,' said <1>", &[who, other], None),
        }
    }

    /// Bring up something on our mind with `other`, given what we think they already know.
    pub fn discuss(&mut self, who: ActorId, other: ActorId, memory: ItemLocation) {
        let thing = memory.subject;
        let they_know = self
            .beliefs(who)
            .nested(other)
            .and_then(|theirs| theirs.location_of(thing))
            .is_some();

        if !they_know {
            self.question(
                who,
                other,
                "'Did you know there's <indef-3> in <4>?' asked <1>",
                &[who, other, thing, memory.location],
                Some(thing),
            );
            self.beliefs_mut(other).nested_mut(who).add(memory);
            return;
        }

        match self.rng.gen_range(0..3) {
            0 => {
                self.question(
                    who,
                    other,
                    "'Do you think we should do something about <3>?' asked <1>",
                    &[who, other, thing],
                    None,
                );
                self.beliefs_mut(other).nested_mut(who).add(memory);
            }
            1 => {
                self.speak_to(
                    who,
                    other,
                    "'I think we should do something about <3>, <2>,' said <1>",
                    &[who, other, thing],
                    None,
                );
                self.beliefs_mut(other).nested_mut(who).add(memory);
            }
            _ => {
                let nerves = self.mind_mut(who).nerves;
                match nerves {
                    Nerves::Calm => self.decide_what_to_do_about(who, other, thing),
                    Nerves::Shaken => self.calm_nerves(who, other, thing),
                }
            }
        }
    }

    /// Deal with our own distress before anything else. Without a remedy, press on regardless.
    fn calm_nerves(&mut self, who: ActorId, other: ActorId, thing: ActorId) {
        let Some(remedy) = self.items(who).remedy else {
            return self.decide_what_to_do_about(who, other, thing);
        };

        if self.world.holds(who, remedy) {
            self.emit("<1> poured <him-1>self a drink from <3>", &[who, other, remedy]);
            self.quench_desire(who, remedy);
            self.mind_mut(who).nerves = Nerves::Calm;
            self.put_down(who, remedy);
        } else if self.recall_location(who, remedy).is_some() {
            self.speak_to(
                who,
                other,
                "'I really must pour myself a drink,' moaned <1>",
                &[who, other, thing],
                Some(remedy),
            );
            self.desire(who, remedy);
            if self.chance(self.weights.ask_where_one_in) {
                self.address(
                    who,
                    other,
                    TopicKind::WhereQuestion,
                    Some(remedy),
                    "'Where did you say <3> was?'",
                    &[who, other, remedy],
                );
            }
        } else {
            self.address(
                who,
                other,
                TopicKind::WhereQuestion,
                Some(remedy),
                "'Where is <3>?  I need a drink,' managed <1>",
                &[who, other, remedy],
            );
            self.desire(who, remedy);
        }
    }

    /// Settle on a course of action about `thing` and try to bring `other` round to it.
    pub fn decide_what_to_do_about(&mut self, who: ActorId, other: ActorId, thing: ActorId) {
        let mine = match self.beliefs(who).goal_for(thing) {
            Some(goal) => *goal,
            None => {
                let course = if self.chance(self.weights.first_course_one_in) {
                    CourseOfAction::CallThePolice
                } else {
                    CourseOfAction::DisposeOf
                };
                let goal = Goal {
                    subject: thing,
                    course,
                };
                self.beliefs_mut(who).add(goal);
                goal
            }
        };
        let theirs = self
            .beliefs(who)
            .nested(other)
            .and_then(|beliefs| beliefs.goal_for(thing))
            .copied();
        tracing::debug!(
            who = %self.world.name(who),
            mine = ?mine.course,
            theirs = ?theirs.map(|goal| goal.course),
            "deciding"
        );

        let participants = [who, other, thing];
        match theirs {
            None => self.speak_to(
                who,
                other,
                format!("'I really think we should {} <3>, <2>,' said <1>", mine.course.phrase()),
                &participants,
                None,
            ),
            Some(goal) if goal.course == mine.course => self.question(
                who,
                other,
                format!("'So we're agreed then, we should {} <3>?' asked <1>", mine.course.phrase()),
                &participants,
                None,
            ),
            Some(goal) => match self.weapon_in_hand(who) {
                Some(weapon) => {
                    self.point_at(who, other, weapon);
                    self.address(
                        who,
                        other,
                        TopicKind::ThreatAgree,
                        Some(thing),
                        format!(
                            "'I really feel *very* strongly that we should {} <3>, <2>,' <he-1> said between clenched teeth",
                            mine.course.phrase()
                        ),
                        &participants,
                    );
                }
                None => self.speak_to(
                    who,
                    other,
                    format!(
                        "'I don't think it would be a good idea to {} <3>, <2>,' said <1>",
                        goal.course.phrase()
                    ),
                    &participants,
                    None,
                ),
            },
        }
        self.beliefs_mut(other).nested_mut(who).add(mine);
    }
}
