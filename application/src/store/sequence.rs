//! Request sequencing: only the newest request per channel may land

/// Independent request streams; a newer request only supersedes older ones
/// on the same channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestChannel {
    Upload,
    Surveys,
    Chart,
}

impl RequestChannel {
    const COUNT: usize = 3;

    fn index(self) -> usize {
        match self {
            RequestChannel::Upload => 0,
            RequestChannel::Surveys => 1,
            RequestChannel::Chart => 2,
        }
    }
}

/// Token handed out when a request starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub channel: RequestChannel,
    pub seq: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct ChannelState {
    latest: u64,
    pending: bool,
    issued: u64,
}

/// Issues tickets and decides which results are still current
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    next_seq: u64,
    channels: [ChannelState; RequestChannel::COUNT],
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request; any older ticket on the channel becomes stale
    pub fn begin(&mut self, channel: RequestChannel) -> RequestTicket {
        self.next_seq += 1;
        let state = &mut self.channels[channel.index()];
        state.latest = self.next_seq;
        state.pending = true;
        state.issued += 1;
        RequestTicket {
            channel,
            seq: self.next_seq,
        }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.channels[ticket.channel.index()].latest == ticket.seq
    }

    /// Settle a ticket; returns false (and changes nothing) if it is stale
    pub fn resolve(&mut self, ticket: RequestTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.channels[ticket.channel.index()].pending = false;
        true
    }

    /// Make every outstanding ticket on the channel stale
    pub fn invalidate(&mut self, channel: RequestChannel) {
        self.next_seq += 1;
        let state = &mut self.channels[channel.index()];
        state.latest = self.next_seq;
        state.pending = false;
    }

    pub fn is_pending(&self, channel: RequestChannel) -> bool {
        self.channels[channel.index()].pending
    }

    pub fn any_pending(&self) -> bool {
        self.channels.iter().any(|c| c.pending)
    }

    /// Tickets handed out on `channel` so far
    pub fn issued(&self, channel: RequestChannel) -> u64 {
        self.channels[channel.index()].issued
    }
}
