use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONTSET_START, GLYPH_HEIGHT, INTERPRETER_END, MEMORY_SIZE,
    STACK_DEPTH,
};
use crate::error::{Error, Result};
use crate::state::State;

/// Sprites are at most 15 rows tall since their height is a nibble
const MAX_SPRITE_HEIGHT: usize = 15;

/// Every operation assumes the pc has already been moved past the instruction being executed.
impl State {
    /// clear
    pub fn clr(&mut self) -> Result<()> {
        self.frame_buffer = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.draw_flag = true;
        Ok(())
    }

    /// PC = STACK.pop()
    pub fn rts(&mut self) -> Result<()> {
        if self.sp == 0 {
            return Err(Error::StackUnderflow);
        }
        self.sp -= 1;
        self.pc = self.stack[usize::from(self.sp)];
        Ok(())
    }

    /// PC = addr
    pub fn jump(&mut self, addr: u16) -> Result<()> {
        self.pc = addr;
        Ok(())
    }

    /// STACK.push(PC); PC = addr
    pub fn call(&mut self, addr: u16) -> Result<()> {
        if usize::from(self.sp) == STACK_DEPTH {
            return Err(Error::StackOverflow);
        }
        self.stack[usize::from(self.sp)] = self.pc;
        self.sp += 1;
        self.pc = addr;
        Ok(())
    }

    /// if Vx == kk then pc += 2
    pub fn ske(&mut self, x: usize, kk: u8) -> Result<()> {
        self.skip_if(self.v[x] == kk)
    }

    /// if Vx != kk then pc += 2
    pub fn skne(&mut self, x: usize, kk: u8) -> Result<()> {
        self.skip_if(self.v[x] != kk)
    }

    /// if Vx == Vy then pc += 2
    pub fn skre(&mut self, x: usize, y: usize) -> Result<()> {
        self.skip_if(self.v[x] == self.v[y])
    }

    /// Vx = kk
    pub fn load(&mut self, x: usize, kk: u8) -> Result<()> {
        self.v[x] = kk;
        Ok(())
    }

    /// Vx += kk
    /// Add kk to Vx; allow for overflow but implicitly drop it
    pub fn add(&mut self, x: usize, kk: u8) -> Result<()> {
        self.v[x] = self.v[x].wrapping_add(kk);
        Ok(())
    }

    /// Vx = Vy
    pub fn mv(&mut self, x: usize, y: usize) -> Result<()> {
        self.v[x] = self.v[y];
        Ok(())
    }

    /// Vx |= Vy
    pub fn or(&mut self, x: usize, y: usize) -> Result<()> {
        self.v[x] |= self.v[y];
        Ok(())
    }

    /// Vx &= Vy
    pub fn and(&mut self, x: usize, y: usize) -> Result<()> {
        self.v[x] &= self.v[y];
        Ok(())
    }

    /// Vx ^= Vy
    pub fn xor(&mut self, x: usize, y: usize) -> Result<()> {
        self.v[x] ^= self.v[y];
        Ok(())
    }

    /// Vx += Vy; VF = carry
    /// VF is written first so that Vx wins when x is F
    pub fn addr(&mut self, x: usize, y: usize) -> Result<()> {
        let sum = u16::from(self.v[x]) + u16::from(self.v[y]);
        self.v[0xF] = u8::from(sum > 0xFF);
        self.v[x] = sum as u8;
        Ok(())
    }

    /// Vx -= Vy; VF = Vx > Vy
    pub fn sub(&mut self, x: usize, y: usize) -> Result<()> {
        let (vx, vy) = (self.v[x], self.v[y]);
        self.v[0xF] = u8::from(vx > vy);
        self.v[x] = vx.wrapping_sub(vy);
        Ok(())
    }

    /// Vx >>= 1; VF = shifted out bit
    pub fn shr(&mut self, x: usize) -> Result<()> {
        let vx = self.v[x];
        self.v[0xF] = vx & 0x1;
        self.v[x] = vx >> 1;
        Ok(())
    }

    /// Vx = Vy - Vx; VF = Vy > Vx
    pub fn subn(&mut self, x: usize, y: usize) -> Result<()> {
        let (vx, vy) = (self.v[x], self.v[y]);
        self.v[0xF] = u8::from(vy > vx);
        self.v[x] = vy.wrapping_sub(vx);
        Ok(())
    }

    /// Vx <<= 1; VF = shifted out bit
    pub fn shl(&mut self, x: usize) -> Result<()> {
        let vx = self.v[x];
        self.v[0xF] = vx >> 7;
        self.v[x] = vx << 1;
        Ok(())
    }

    /// if Vx != Vy then pc += 2
    pub fn skrne(&mut self, x: usize, y: usize) -> Result<()> {
        self.skip_if(self.v[x] != self.v[y])
    }

    /// I = addr
    pub fn loadi(&mut self, addr: u16) -> Result<()> {
        self.i = addr;
        Ok(())
    }

    /// PC = V0 + addr
    pub fn jumpi(&mut self, addr: u16) -> Result<()> {
        self.pc = addr + u16::from(self.v[0x0]);
        Ok(())
    }

    /// Vx = random_byte & kk
    pub fn rand(&mut self, x: usize, kk: u8, random_byte: u8) -> Result<()> {
        self.v[x] = random_byte & kk;
        Ok(())
    }

    /// draw_sprite(x=Vx y=Vy size=n)
    /// XORs a sprite from memory I..I+n at position Vx, Vy on the FrameBuffer, wrapping at
    /// the edges. Sets VF if any pixel gets erased.
    pub fn draw(&mut self, x: usize, y: usize, n: u8) -> Result<()> {
        let height = usize::from(n);
        let mut sprite = [0u8; MAX_SPRITE_HEIGHT];
        sprite[..height].copy_from_slice(self.slice(usize::from(self.i), height)?);

        let origin_x = usize::from(self.v[x]);
        let origin_y = usize::from(self.v[y]);
        let mut collision = false;

        for (row, byte) in sprite[..height].iter().enumerate() {
            let py = (origin_y + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                if byte & (0x80 >> bit) == 0 {
                    continue;
                }
                let px = (origin_x + bit) % DISPLAY_WIDTH;
                let pixel = &mut self.frame_buffer[py][px];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }

        self.v[0xF] = u8::from(collision);
        self.draw_flag = true;
        Ok(())
    }

    /// if Vx.pressed then pc += 2
    pub fn skpr(&mut self, x: usize) -> Result<()> {
        let pressed = self.key(self.v[x])?;
        self.skip_if(pressed)
    }

    /// if !Vx.pressed then pc += 2
    pub fn skup(&mut self, x: usize) -> Result<()> {
        let pressed = self.key(self.v[x])?;
        self.skip_if(!pressed)
    }

    /// Vx = DT
    pub fn moved(&mut self, x: usize) -> Result<()> {
        self.v[x] = self.delay_timer;
        Ok(())
    }

    /// await keypress for Vx
    ///
    /// Rewinds the pc so this instruction runs again until some key is down. The value stored
    /// is the pressed latch (always 1), not the index of the key.
    pub fn keyd(&mut self, x: usize) -> Result<()> {
        if let Some(&latch) = self.keyboard.iter().find(|&&pressed| pressed) {
            self.v[x] = u8::from(latch);
            return Ok(());
        }

        let rewound = usize::from(self.pc).saturating_sub(2);
        if rewound <= usize::from(INTERPRETER_END) {
            return Err(Error::AddressOverflow { address: rewound });
        }
        self.pc -= 2;
        Ok(())
    }

    /// DT = Vx
    pub fn loads(&mut self, x: usize) -> Result<()> {
        self.delay_timer = self.v[x];
        Ok(())
    }

    /// ST = Vx
    pub fn ld(&mut self, x: usize) -> Result<()> {
        self.sound_timer = self.v[x];
        Ok(())
    }

    /// I += Vx
    pub fn addi(&mut self, x: usize) -> Result<()> {
        let vx = usize::from(self.v[x]);
        let i = usize::from(self.i);
        if i >= MEMORY_SIZE - vx {
            return Err(Error::AddressOverflow { address: i + vx });
        }
        self.i += u16::from(self.v[x]);
        Ok(())
    }

    /// I = 0x50 + Vx * 5
    /// Set I to the memory address of the fontset glyph for the digit in Vx
    pub fn ldspr(&mut self, x: usize) -> Result<()> {
        let glyph = FONTSET_START + u16::from(self.v[x]) * GLYPH_HEIGHT;
        if self.v[x] > 0xF {
            return Err(Error::AddressOverflow {
                address: usize::from(glyph),
            });
        }
        self.i = glyph;
        Ok(())
    }

    /// mem[I..I+3] = bcd(Vx)
    /// Store BCD repr of Vx in memory starting at address i
    pub fn bcd(&mut self, x: usize) -> Result<()> {
        let vx = self.v[x];
        let bcd = [vx / 100, vx / 10 % 10, vx % 10];
        self.slice_mut(usize::from(self.i), 3)?.copy_from_slice(&bcd);
        Ok(())
    }

    /// mem[I..=I+x] = V0..=Vx
    pub fn stor(&mut self, x: usize) -> Result<()> {
        let i = self.spill_address(x)?;
        let v = self.v;
        self.slice_mut(i, x + 1)?.copy_from_slice(&v[..=x]);
        Ok(())
    }

    /// V0..=Vx = mem[I..=I+x]
    pub fn read(&mut self, x: usize) -> Result<()> {
        let i = self.spill_address(x)?;
        let mut v = self.v;
        v[..=x].copy_from_slice(self.slice(i, x + 1)?);
        self.v = v;
        Ok(())
    }

    /// Skips the next instruction when `condition` holds, refusing to move the pc past the
    /// last complete instruction in memory.
    fn skip_if(&mut self, condition: bool) -> Result<()> {
        if condition {
            let pc = usize::from(self.pc);
            if pc > MEMORY_SIZE - 3 {
                return Err(Error::AddressOverflow { address: pc + 2 });
            }
            self.pc += 2;
        }
        Ok(())
    }

    fn key(&self, key: u8) -> Result<bool> {
        self.keyboard
            .get(usize::from(key))
            .copied()
            .ok_or(Error::InvalidKey { key })
    }

    /// Guard shared by register spill and reload.
    ///
    /// This compares I against `MEMORY_SIZE - x`, which lets `I == MEMORY_SIZE - x` through even
    /// though V0..=Vx would then need one byte past the end. That case is still refused, by the
    /// bounds-checked slice, before anything is copied.
    fn spill_address(&self, x: usize) -> Result<usize> {
        let i = usize::from(self.i);
        if i > MEMORY_SIZE - x {
            return Err(Error::AddressOverflow { address: i + x });
        }
        Ok(i)
    }
}
